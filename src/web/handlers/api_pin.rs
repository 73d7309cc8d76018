use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;

use tradehouse::common::PinError;
use tradehouse::log_err;
use tradehouse::models::{PinGranted, PinRequest, PinVerify};
use tradehouse::services::PinGate;

use crate::web::errors::ApiError;
use crate::web::helpers::client_ip;
use crate::web::security::limits;
use crate::web::state::AppState;

const PIN_SENT: &str = "If this address may download the file, a PIN is on its way.";

fn gate(state: &AppState) -> PinGate<'_> {
    PinGate::new(&state.pool, &state.config.secure_download, &state.mailer)
}

/// Same answer whether or not the address is allowed, and whether or not
/// the mail provider accepted the message.
#[post("/api/generate-pin")]
pub async fn generate_pin(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PinRequest>,
) -> Result<HttpResponse, ApiError> {
    if !state
        .rate_limiter
        .check("pin", &client_ip(&req), limits::PIN_REQUEST)
    {
        return Err(ApiError::TooManyRequests);
    }

    match gate(&state).request(&body.email).await {
        Ok(()) => {}
        Err(PinError::Mail(e)) => {
            log::error!("Could not deliver download PIN: {}", e);
            log_err!(
                state.pool,
                json!({
                    "action": "generate_pin",
                    "email": body.email,
                    "error": e.to_string(),
                })
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::Ok().json(json!({ "message": PIN_SENT })))
}

#[post("/api/verify-pin")]
pub async fn verify_pin(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PinVerify>,
) -> Result<HttpResponse, ApiError> {
    if !state
        .rate_limiter
        .check("verify", &client_ip(&req), limits::PIN_VERIFY)
    {
        return Err(ApiError::TooManyRequests);
    }

    let redirect_url = gate(&state).verify(&body.email, &body.pin).await?;
    Ok(HttpResponse::Ok().json(PinGranted { redirect_url }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_pin).service(verify_pin);
}
