//! Compression handler
//!
//! Parses one multipart upload, persists it, runs the conversion and returns
//! the derived AVIF as a download. Losslessness is not client-controllable on
//! this route.

use std::sync::Arc;

use avifpress_core::AppError;
use avifpress_services::CompressionRequest;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};

use crate::error::HttpAppError;
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";
const QUALITY_FIELD: &str = "compressionPercentage";

#[tracing::instrument(skip(state, multipart))]
pub async fn compress(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (data, original_filename, quality_pct) = extract_fields(multipart).await?;

    let source = state.store.save_incoming(&original_filename, &data).await?;

    let request = CompressionRequest::new(quality_pct);
    let output = state.converter.convert(&source, &request).await?;

    let encoded = state.store.read(&output).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/avif"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=compressed.avif",
            ),
        ],
        encoded,
    ))
}

/// Pull the binary `image` field and the integer `compressionPercentage`
/// field out of the multipart body. A missing field or a non-numeric
/// percentage is a validation failure before any filesystem work happens.
async fn extract_fields(mut multipart: Multipart) -> Result<(Vec<u8>, String, i64), AppError> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut quality_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            IMAGE_FIELD => {
                if image.is_some() {
                    return Err(AppError::Validation(
                        "Multiple image fields are not allowed; send exactly one field named 'image'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read image data: {}", e)))?;
                image = Some((data.to_vec(), filename));
            }
            QUALITY_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read compression percentage: {}", e))
                })?;
                quality_raw = Some(text);
            }
            _ => {}
        }
    }

    let (data, filename) =
        image.ok_or_else(|| AppError::Validation("No image provided".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Image is empty".to_string()));
    }

    let quality_raw = quality_raw
        .ok_or_else(|| AppError::Validation("No compression percentage provided".to_string()))?;
    let quality_pct = quality_raw.trim().parse::<i64>().map_err(|_| {
        AppError::Validation(format!(
            "Compression percentage must be an integer, got '{}'",
            quality_raw
        ))
    })?;

    Ok((data, filename, quality_pct))
}
