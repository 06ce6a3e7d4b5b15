//! Storage abstraction trait
//!
//! Every backend an uploaded asset can land in implements [`Storage`].

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// `key` is the full object path, including any orientation prefix added by
/// placement. Implementations copy the file at `source` without buffering it
/// in memory and return the public locator of the stored object.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the file at `source` under `key`, tagged with `content_type`.
    async fn put_file(&self, key: &str, source: &Path, content_type: &str)
        -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape the bucket or assets root.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
