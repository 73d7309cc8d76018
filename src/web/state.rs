use sqlx::PgPool;
use std::sync::Arc;

use tradehouse::config::Config;
use tradehouse::services::Mailer;

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub mailer: Mailer,
    pub rate_limiter: Arc<RateLimiter>,
}
