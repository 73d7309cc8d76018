use actix_multipart::Multipart;
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use log::info;
use serde_json::json;

use tradehouse::common::UploadError;
use tradehouse::services::media;

use crate::web::errors::ApiError;
use crate::web::helpers::require_admin_api;
use crate::web::state::AppState;

/// Stores the first file part of the form and returns its public URL.
#[post("/api/upload")]
pub async fn upload(
    state: web::Data<AppState>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    require_admin_api(&state.pool, &req).await?;
    let max_bytes = state.config.max_upload_bytes;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| UploadError::Malformed(e.to_string()))?;

        let Some(original) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            // Plain form fields are ignored
            continue;
        };

        let ext = media::upload_extension(&original)
            .ok_or_else(|| UploadError::UnsupportedType(original.clone()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadError::Malformed(e.to_string()))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(UploadError::TooLarge(max_bytes).into());
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(UploadError::MissingFile.into());
        }

        let stored = media::stored_file_name(ext);
        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(UploadError::from)?;
        tokio::fs::write(state.config.upload_dir.join(&stored), &bytes)
            .await
            .map_err(UploadError::from)?;

        info!("Stored upload '{}' as {} ({} bytes)", original, stored, bytes.len());
        let url = format!("{}/uploads/{}", state.config.public_base_url, stored);
        return Ok(HttpResponse::Created().json(json!({ "url": url })));
    }

    Err(UploadError::MissingFile.into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload);
}
