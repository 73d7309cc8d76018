pub mod errors;
pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod security;
pub mod state;
pub mod templates;

use actix_web::web;

pub use errors::ApiError;

const JSON_LIMIT: usize = 256 * 1024;

/// JSON bodies that fail to parse answer with the API's `{"error"}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::NotFound(err.to_string()).into())
}
