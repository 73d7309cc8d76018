use std::fmt;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// How a record was looked up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Iden {
    Id(Uuid),
    Slug(String),
    Email(String),
}

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{kind} with {iden} not found")]
    NotFound { kind: &'static str, iden: Iden },

    #[error("{kind} with {iden} already exists")]
    AlreadyExists { kind: &'static str, iden: Iden },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Secure download is not configured")]
    NotConfigured,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No active PIN for this email")]
    NoActivePin,

    #[error("PIN has expired")]
    Expired,

    #[error("Incorrect PIN")]
    Mismatch,

    #[error("Too many attempts, request a new PIN")]
    TooManyAttempts,

    #[error("PIN hashing error: {0}")]
    Hash(String),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider rejected message with status {0}")]
    Rejected(u16),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file field in upload")]
    MissingFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File exceeds the {0} byte limit")]
    TooLarge(usize),

    #[error("Malformed multipart payload: {0}")]
    Malformed(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for Iden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iden::Id(id) => write!(f, "ID {}", id),
            Iden::Slug(slug) => write!(f, "slug '{}'", slug),
            Iden::Email(email) => write!(f, "email '{}'", email),
        }
    }
}

impl From<Uuid> for Iden {
    fn from(id: Uuid) -> Self {
        Iden::Id(id)
    }
}

impl ResourceError {
    pub fn not_found(kind: &'static str, iden: impl Into<Iden>) -> Self {
        Self::NotFound {
            kind,
            iden: iden.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

fn has_sql_state(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sql_state(err, "23505")
}

pub fn is_check_violation(err: &sqlx::Error) -> bool {
    has_sql_state(err, "23514")
}
