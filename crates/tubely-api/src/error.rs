//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every failure, including those
//! raised by the upload pipeline, is funnelled through [`AppError`] so the
//! status code, body shape and logging are decided in one place.

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::io;
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use tubely_processing::{UploadError, ValidationError};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether resubmitting the request may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

fn multipart_app_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        AppError::BadRequest(format!("Unable to parse form: {}", err.body_text()))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(multipart_app_error(&err))
    }
}

/// A staging failure caused by the request body itself (client disconnect,
/// size limit) is the client's problem, not ours.
fn staging_app_error(err: &io::Error) -> AppError {
    match err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
    {
        Some(multipart) => multipart_app_error(multipart),
        None => AppError::Internal(format!("Failed to stage upload: {}", err)),
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        let stage = err.stage();
        let app_error = match err {
            UploadError::VideoNotFound(_) => AppError::NotFound("Couldn't find video".to_string()),
            UploadError::NotOwner { .. } => {
                AppError::Forbidden("Not authorized to update this video".to_string())
            }
            UploadError::Validation(ValidationError::UnsupportedMediaType {
                content_type,
                allowed,
            }) => AppError::UnsupportedMediaType(format!(
                "Invalid file type {}. Allowed types: {}",
                content_type,
                allowed.join(", ")
            )),
            UploadError::Validation(ValidationError::MalformedContentType(_)) => {
                AppError::InvalidInput("Invalid Content-Type".to_string())
            }
            UploadError::Staging(ref io_err) => staging_app_error(io_err),
            UploadError::Key(e) => AppError::Internal(e.to_string()),
            UploadError::Optimize(e) => AppError::MediaProcessing(e.to_string()),
            UploadError::Probe(e) => AppError::MediaProcessing(e.to_string()),
            UploadError::Store(e) => AppError::Storage(e.to_string()),
            UploadError::Lookup(e) | UploadError::Commit(e) => {
                AppError::Database(format!("{}: {:#}", stage, e))
            }
        };
        HttpAppError(app_error)
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: None,
            error_type: None,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };
        // Picked up by error_details_middleware when not in production.
        let detailed = (!app_error.is_sensitive()).then(|| ErrorResponse {
            details: Some(app_error.detailed_message()),
            error_type: Some(app_error.error_type().to_string()),
            ..body.clone()
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(detailed) = detailed {
            response.extensions_mut().insert(detailed);
        }
        response
    }
}
