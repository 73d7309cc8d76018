use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use tradehouse::common::{PinError, ResourceError, UploadError};

/// Error side of every JSON endpoint. Renders as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Gone(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("Too many requests, please try again later")]
    TooManyRequests,

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("An internal error occurred")]
    Internal,
}

impl ApiError {
    pub fn not_found(kind: &str, key: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {key} not found"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Gone(_) => StatusCode::GONE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("Database error: {}", err);
        Self::Internal
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ResourceError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            ResourceError::InvalidRequest(msg) => Self::BadRequest(msg),
            ResourceError::Database(e) => e.into(),
        }
    }
}

impl From<PinError> for ApiError {
    fn from(err: PinError) -> Self {
        match err {
            PinError::NotConfigured => Self::Unavailable(err.to_string()),
            PinError::InvalidRequest(msg) => Self::BadRequest(msg),
            PinError::NoActivePin | PinError::Mismatch => {
                Self::InvalidCredentials(err.to_string())
            }
            PinError::Expired => Self::Gone(err.to_string()),
            PinError::TooManyAttempts => Self::TooManyRequests,
            PinError::Mail(e) => {
                log::error!("PIN email failed: {}", e);
                Self::BadGateway("Could not send the PIN email, please try again".into())
            }
            PinError::Hash(e) => {
                log::error!("PIN hashing error: {}", e);
                Self::Internal
            }
            PinError::Database(e) => e.into(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile | UploadError::Malformed(_) => {
                Self::BadRequest(err.to_string())
            }
            UploadError::UnsupportedType(_) => {
                Self::UnsupportedMediaType(err.to_string())
            }
            UploadError::TooLarge(_) => Self::PayloadTooLarge(err.to_string()),
            UploadError::Io(e) => {
                log::error!("Upload storage error: {}", e);
                Self::Internal
            }
        }
    }
}
