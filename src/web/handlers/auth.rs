use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use chrono::Duration;
use std::sync::OnceLock;
use uuid::Uuid;

use tradehouse::common::normalize_email;
use tradehouse::db;
use tradehouse::services::PasswordManager;

use crate::web::forms::{AuthQuery, LoginForm};
use crate::web::helpers::{
    client_ip, current_admin, expired_session_cookie, redirect, render, session_cookie,
    session_token,
};
use crate::web::security::limits;
use crate::web::state::AppState;
use crate::web::templates::AdminLoginTemplate;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Verified against when the email is unknown so both failure paths cost
/// one argon2 run.
fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| {
            let throwaway = Uuid::new_v4().to_string();
            match PasswordManager::hash_password(&throwaway) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    log::error!("Failed to generate dummy hash: {}", e);
                    None
                }
            }
        })
        .as_deref()
}

fn login_error(code: &str) -> String {
    match code {
        "missing" => "Email and password are required",
        "invalid" => "Invalid email or password",
        "rate_limit" => "Too many login attempts. Please try again later.",
        "internal" => "An internal error occurred. Please try again.",
        _ => "Please sign in",
    }
    .to_string()
}

#[get("/admin/login")]
pub async fn login_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    if let Ok(Some(_)) = current_admin(&state.pool, &req).await {
        return redirect("/admin");
    }

    let error = query.error.as_deref().map(login_error);
    render(AdminLoginTemplate { error })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    if !state
        .rate_limiter
        .check("login", &client_ip(&req), limits::LOGIN)
    {
        return redirect("/admin/login?error=rate_limit");
    }

    let email = normalize_email(&form.email);
    if email.is_empty() || form.password.is_empty() {
        return redirect("/admin/login?error=missing");
    }

    let admin = match db::get_admin_by_email(&state.pool, &email).await {
        Ok(admin) => admin,
        Err(e) => {
            log::error!("Database error during login: {}", e);
            return redirect("/admin/login?error=internal");
        }
    };

    let stored_hash = admin
        .as_ref()
        .map(|a| a.password_hash.as_str())
        .or_else(|| dummy_hash());
    let password_valid = stored_hash
        .map(|hash| {
            PasswordManager::verify_password(&form.password, hash).unwrap_or(false)
        })
        .unwrap_or(false);

    let Some(admin) = admin.filter(|_| password_valid) else {
        log::warn!("Failed admin login for {}", email);
        return redirect("/admin/login?error=invalid");
    };

    let ttl = Duration::hours(state.config.session_ttl_hours);
    let session = match db::create_session(&state.pool, admin.id, ttl).await {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not create admin session: {}", e);
            return redirect("/admin/login?error=internal");
        }
    };

    log::info!("Admin {} signed in", admin.email);
    HttpResponse::SeeOther()
        .cookie(session_cookie(session.token, ttl_hours, state.config.cookie_secure))
        .insert_header(("Location", "/admin"))
        .finish()
}

#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(token) = session_token(&req) {
        if let Err(e) = db::delete_session(&state.pool, token).await {
            log::error!("Could not delete admin session: {}", e);
        }
    }

    HttpResponse::SeeOther()
        .cookie(expired_session_cookie(state.config.cookie_secure))
        .insert_header(("Location", "/admin/login"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form).service(login_submit).service(logout);
}
