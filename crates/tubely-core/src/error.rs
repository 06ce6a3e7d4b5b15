//! Error types module
//!
//! All request-facing failures are unified under [`AppError`]. Each variant
//! describes how it should be presented to a client through [`ErrorMetadata`],
//! so the HTTP layer never has to guess a status code or decide what is safe
//! to reveal.
//!
//! `From<sqlx::Error>` is gated behind the `sqlx` feature.

/// Severity an error is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client mistakes.
    Debug,
    /// Rejected credentials and ownership checks.
    Warn,
    /// Failures on our side.
    Error,
}

/// How an error is presented to a client and to the logs.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable, machine-readable code such as `STORAGE_ERROR`.
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same request may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show the caller.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their inner message.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Media processing error: {0}")]
    MediaProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY_LATER: Option<&str> = Some("Retry after a short delay");

impl Presentation {
    const fn server(code: &'static str, recoverable: bool, action: Option<&'static str>) -> Self {
        Self {
            status: 500,
            code,
            recoverable,
            action,
            sensitive: true,
            level: LogLevel::Error,
        }
    }

    const fn client(status: u16, code: &'static str, action: &'static str) -> Self {
        Self {
            status,
            code,
            recoverable: false,
            action: Some(action),
            sensitive: false,
            level: LogLevel::Debug,
        }
    }

    const fn warn(self) -> Self {
        Self {
            level: LogLevel::Warn,
            ..self
        }
    }
}

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::Database(_) => Presentation::server("DATABASE_ERROR", true, RETRY_LATER),
            AppError::Storage(_) => Presentation::server("STORAGE_ERROR", true, RETRY_LATER),
            AppError::MediaProcessing(_) => Presentation::server(
                "MEDIA_PROCESSING_ERROR",
                false,
                Some("Check that the file is a valid, complete video"),
            ),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                Presentation::server("INTERNAL_ERROR", true, RETRY_LATER)
            }
            AppError::InvalidInput(_) => Presentation::client(
                400,
                "INVALID_INPUT",
                "Check request parameters and try again",
            ),
            AppError::BadRequest(_) => {
                Presentation::client(400, "BAD_REQUEST", "Check request format and parameters")
            }
            AppError::UnsupportedMediaType(_) => Presentation::client(
                415,
                "UNSUPPORTED_MEDIA_TYPE",
                "Upload a file with an allowed content type",
            ),
            AppError::NotFound(_) => {
                Presentation::client(404, "NOT_FOUND", "Verify the resource ID exists")
            }
            AppError::PayloadTooLarge(_) => {
                Presentation::client(413, "PAYLOAD_TOO_LARGE", "Reduce file size")
            }
            AppError::Unauthorized(_) => {
                Presentation::client(401, "UNAUTHORIZED", "Check the bearer token").warn()
            }
            AppError::Forbidden(_) => Presentation::client(
                403,
                "FORBIDDEN",
                "Only the owner of a video may modify it",
            )
            .warn(),
        }
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::MediaProcessing(_) => "MediaProcessing",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access video records".to_string(),
            AppError::Storage(_) => "Failed to store uploaded file".to_string(),
            AppError::MediaProcessing(_) => "Failed to process uploaded media".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::UnsupportedMediaType(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_sensitive_errors_hide_internal_detail() {
        let err = AppError::MediaProcessing("ffprobe failed on /tmp/tubely-upload-abc.mp4".to_string());
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("/tmp"));

        let err = AppError::Storage("bucket tubely-prod: access denied".to_string());
        assert!(!err.client_message().contains("tubely-prod"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = AppError::UnsupportedMediaType("image/gif".to_string());
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.client_message(), "image/gif");
        assert!(!err.is_sensitive());

        let err = AppError::Forbidden("not your video".to_string());
        assert_eq!(err.http_status_code(), 403);
        assert_eq!(err.log_level(), LogLevel::Warn);

        let err = AppError::NotFound("Couldn't find video".to_string());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("disk full").context("writing scratch file"));
        let details = err.detailed_message();
        assert!(details.contains("Internal error with source"));
        assert!(details.contains("Caused by"));
    }
}
