//! Common utilities for file upload handlers

use axum::extract::multipart::Field;
use futures::TryStreamExt;
use std::io;
use tokio_util::io::StreamReader;
use tubely_core::AppError;
use tubely_processing::UploadedAsset;
use uuid::Uuid;

/// Parse the `{video_id}` path segment.
pub fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidInput("Invalid ID".to_string()))
}

/// Hand a multipart field to the pipeline without buffering it.
///
/// A missing part `Content-Type` becomes an empty string, which the pipeline
/// rejects as malformed.
pub fn field_to_asset(field: Field<'_>) -> UploadedAsset<'_> {
    let content_type = field.content_type().map(str::to_owned).unwrap_or_default();
    let body = StreamReader::new(field.map_err(io::Error::other));
    UploadedAsset::new(content_type, body)
}

pub fn missing_field(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing form field '{}'", name))
}
