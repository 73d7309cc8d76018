use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use sqlx::PgPool;
use uuid::Uuid;

use tradehouse::db;
use tradehouse::models::{AdminUser, BusinessLine};

use crate::web::errors::ApiError;

pub const SESSION_COOKIE: &str = "th_session";

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_with_status(t, actix_web::http::StatusCode::OK)
}

pub fn render_with_status<T: Template>(
    t: T,
    status: actix_web::http::StatusCode,
) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Template error: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Template error")
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

pub fn session_token(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok())
}

pub fn session_cookie(token: Uuid, ttl_hours: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .finish()
}

pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// Admin owning the request's session cookie, if it is still live.
pub async fn current_admin(
    pool: &PgPool,
    req: &HttpRequest,
) -> Result<Option<AdminUser>, sqlx::Error> {
    match session_token(req) {
        Some(token) => db::get_admin_by_session(pool, token).await,
        None => Ok(None),
    }
}

/// Gate for admin HTML pages: anonymous visitors go to the login form.
pub async fn require_admin_page(
    pool: &PgPool,
    req: &HttpRequest,
) -> Result<AdminUser, HttpResponse> {
    match current_admin(pool, req).await {
        Ok(Some(admin)) => Ok(admin),
        Ok(None) => Err(redirect("/admin/login")),
        Err(e) => {
            log::error!("Session lookup failed: {}", e);
            Err(HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("An internal error occurred"))
        }
    }
}

/// Gate for admin JSON endpoints.
pub async fn require_admin_api(
    pool: &PgPool,
    req: &HttpRequest,
) -> Result<AdminUser, ApiError> {
    current_admin(pool, req).await?.ok_or(ApiError::Unauthorized)
}

/// `?business_line=` accepts both `bike_lpg` and `bike-lpg`; blank means all.
pub fn parse_line(raw: Option<&str>) -> Result<Option<BusinessLine>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse().map(Some).map_err(ApiError::BadRequest),
        None => Ok(None),
    }
}
