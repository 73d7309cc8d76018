use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use log::{info, warn};

use crate::common::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub public_base_url: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub admin_bootstrap: Option<AdminBootstrap>,
    pub mail: MailConfig,
    pub secure_download: SecureDownloadConfig,
    pub screenshot_service_url: String,
    pub developer: Option<DeveloperCredit>,
}

/// Admin account created at startup when none with this email exists.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct SecureDownloadConfig {
    /// `None` disables the PIN flow.
    pub redirect_url: Option<String>,
    /// Lowercased. Empty means any valid email may request a PIN.
    pub allowed_emails: Vec<String>,
    pub pin_ttl_minutes: i64,
    pub pin_max_attempts: i32,
}

#[derive(Debug, Clone)]
pub struct DeveloperCredit {
    pub name: String,
    pub url: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url =
            var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let admin_bootstrap = match (var("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !password.is_empty() => Some(AdminBootstrap {
                email: email.to_lowercase(),
                password,
            }),
            (Some(_), _) | (None, Some(_)) => {
                warn!(
                    "ADMIN_EMAIL and ADMIN_PASSWORD must both be set to \
                     bootstrap an admin"
                );
                None
            }
            (None, None) => None,
        };

        let allowed_emails = var("SECURE_DOWNLOAD_EMAILS")
            .map(|list| {
                list.split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let developer = match (var("DEVELOPER_NAME"), var("DEVELOPER_URL")) {
            (Some(name), Some(url)) => Some(DeveloperCredit { name, url }),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            upload_dir: PathBuf::from(
                var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string()),
            ),
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            session_ttl_hours: parse_positive(&var, "SESSION_TTL_HOURS", 12)?,
            cookie_secure: parse_or(&var, "COOKIE_SECURE", true)?,
            admin_bootstrap,
            mail: MailConfig {
                api_url: var("MAIL_API_URL"),
                api_key: var("MAIL_API_KEY"),
                from: var("MAIL_FROM")
                    .unwrap_or_else(|| "no-reply@localhost".to_string()),
            },
            secure_download: SecureDownloadConfig {
                redirect_url: var("SECURE_DOWNLOAD_URL"),
                allowed_emails,
                pin_ttl_minutes: parse_positive(&var, "PIN_TTL_MINUTES", 10)?,
                pin_max_attempts: parse_positive(&var, "PIN_MAX_ATTEMPTS", 5)?,
            },
            screenshot_service_url: var("SCREENSHOT_SERVICE_URL")
                .unwrap_or_else(|| "https://image.thum.io/get/width/600/".to_string()),
            developer,
        })
    }
}

fn parse_or<T, V>(var: &V, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_positive<T, V>(var: &V, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display + PartialOrd + Default,
    T::Err: Display,
    V: Fn(&str) -> Option<String>,
{
    let value = parse_or(var, key, default)?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(value)
}
