mod web;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tradehouse::common::{normalize_email, ResourceError};
use tradehouse::config::{AdminBootstrap, Config};
use tradehouse::db::{self, Database};
use tradehouse::models::AdminCreate;
use tradehouse::services::{Mailer, PasswordManager};

use crate::web::middleware::SecurityHeaders;
use crate::web::security::{PasswordValidator, RateLimiter};
use crate::web::state::AppState;

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

/// Creates the configured admin unless that email is already registered.
async fn bootstrap_admin(
    pool: &sqlx::PgPool,
    admin: &AdminBootstrap,
) -> std::io::Result<()> {
    if let Err(reason) = PasswordValidator::validate(&admin.password) {
        log::warn!("ADMIN_PASSWORD rejected: {}", reason);
        return Ok(());
    }

    let password_hash =
        PasswordManager::hash_password(&admin.password).map_err(io_error)?;
    let data = AdminCreate {
        email: normalize_email(&admin.email),
        password_hash,
    };

    match db::create_admin(pool, &data).await {
        Ok(created) => log::info!("Created admin account {}", created.email),
        Err(ResourceError::AlreadyExists { .. }) => {
            log::debug!("Admin account {} already exists", data.email)
        }
        Err(e) => return Err(io_error(e)),
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(io_error)?;

    let db = Database::new(&config.database_url).await.map_err(io_error)?;

    if let Some(admin) = &config.admin_bootstrap {
        bootstrap_admin(&db.pool, admin).await?;
    }
    match db::count_admins(&db.pool).await {
        Ok(0) => log::warn!(
            "No admin account exists; set ADMIN_EMAIL and ADMIN_PASSWORD"
        ),
        Ok(_) => {}
        Err(e) => log::error!("Could not count admins: {}", e),
    }
    match db::purge_expired_sessions(&db.pool).await {
        Ok(n) if n > 0 => log::info!("Purged {} expired admin sessions", n),
        Ok(_) => {}
        Err(e) => log::error!("Could not purge expired sessions: {}", e),
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let mailer = Mailer::from_config(&config.mail).map_err(io_error)?;

    let bind_addr = config.bind_addr.clone();
    let upload_dir = config.upload_dir.clone();
    let state = Data::new(AppState {
        pool: db.pool,
        mailer,
        config: Arc::new(config),
        rate_limiter: Arc::new(RateLimiter::new()),
    });

    log::info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::json_config())
            .app_data(web::path_config())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(web::handlers::configure)
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(Files::new("/uploads", upload_dir.clone()))
            .default_service(actix_web::web::to(web::handlers::public::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
