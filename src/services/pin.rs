//! The secure-download handshake: email a one-time PIN, check it, hand
//! back the download URL.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use log::info;
use sqlx::PgPool;

use super::mailer::{Email, Mailer};
use super::PasswordManager;
use crate::common::{normalize_email, validate_email, PinError};
use crate::config::SecureDownloadConfig;
use crate::db;

pub const PIN_LENGTH: usize = 6;

/// Six ASCII digits from the OS RNG.
pub fn generate_pin() -> String {
    // 4_294_000_000 is the largest multiple of 1_000_000 below u32::MAX.
    loop {
        let n = OsRng.next_u32();
        if n < 4_294_000_000 {
            return format!("{:06}", n % 1_000_000);
        }
    }
}

pub fn is_pin_format(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

pub struct PinGate<'a> {
    pool: &'a PgPool,
    config: &'a SecureDownloadConfig,
    mailer: &'a Mailer,
}

impl<'a> PinGate<'a> {
    pub fn new(
        pool: &'a PgPool,
        config: &'a SecureDownloadConfig,
        mailer: &'a Mailer,
    ) -> Self {
        Self {
            pool,
            config,
            mailer,
        }
    }

    fn redirect_url(&self) -> Result<&'a str, PinError> {
        self.config
            .redirect_url
            .as_deref()
            .ok_or(PinError::NotConfigured)
    }

    fn is_allowed(&self, email: &str) -> bool {
        self.config.allowed_emails.is_empty()
            || self.config.allowed_emails.iter().any(|e| e == email)
    }

    /// Emails a fresh PIN. Addresses outside the allow-list get the same
    /// `Ok(())` without a mail being sent.
    pub async fn request(&self, email: &str) -> Result<(), PinError> {
        self.redirect_url()?;

        if !validate_email(email) {
            return Err(PinError::InvalidRequest(
                "Please enter a valid email address".into(),
            ));
        }
        let email = normalize_email(email);

        if !self.is_allowed(&email) {
            info!("PIN requested for {} which is not on the allow-list", email);
            return Ok(());
        }

        let pin = generate_pin();
        let pin_hash = PasswordManager::hash_password(&pin)
            .map_err(|e| PinError::Hash(e.to_string()))?;
        let expires_at = Utc::now() + Duration::minutes(self.config.pin_ttl_minutes);

        db::replace_pin(self.pool, &email, &pin_hash, expires_at).await?;

        self.mailer
            .send(&Email {
                to: email.clone(),
                subject: "Your download PIN".into(),
                text: format!(
                    "Your download PIN is {pin}. It expires in {} minutes.\n\n\
                     If you did not request it, you can ignore this email.",
                    self.config.pin_ttl_minutes
                ),
            })
            .await?;

        info!("Issued download PIN for {}", email);
        Ok(())
    }

    /// Checks `pin` and returns the download URL. A PIN works once.
    pub async fn verify(
        &self,
        email: &str,
        pin: &str,
    ) -> Result<String, PinError> {
        let redirect_url = self.redirect_url()?;

        let pin = pin.trim();
        if !validate_email(email) || !is_pin_format(pin) {
            return Err(PinError::InvalidRequest(format!(
                "Provide your email and the {PIN_LENGTH}-digit PIN"
            )));
        }
        let email = normalize_email(email);

        let live = db::get_live_pin(self.pool, &email)
            .await?
            .ok_or(PinError::NoActivePin)?;

        if live.is_expired(Utc::now()) {
            return Err(PinError::Expired);
        }

        let max = self.config.pin_max_attempts;
        let Some(attempts) = db::claim_pin_attempt(self.pool, live.id, max).await?
        else {
            // Lost the race: find out what retired the PIN.
            return Err(match db::get_live_pin(self.pool, &email).await? {
                Some(now) if now.id == live.id && now.is_expired(Utc::now()) => {
                    PinError::Expired
                }
                Some(now) if now.id == live.id => PinError::TooManyAttempts,
                _ => PinError::NoActivePin,
            });
        };

        let matches = PasswordManager::verify_password(pin, &live.pin_hash)
            .map_err(|e| PinError::Hash(e.to_string()))?;

        if !matches {
            return Err(if attempts >= max {
                PinError::TooManyAttempts
            } else {
                PinError::Mismatch
            });
        }

        if !db::consume_pin(self.pool, live.id).await? {
            return Err(PinError::NoActivePin);
        }

        info!("Download PIN verified for {}", email);
        Ok(redirect_url.to_string())
    }
}
