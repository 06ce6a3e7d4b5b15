#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::{Config, ThumbnailStorageMode};

/// Create the bucket that receives video uploads.
#[cfg(feature = "storage-s3")]
pub async fn create_video_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = &config.storage;
    if storage.s3_bucket.is_empty() {
        return Err(StorageError::ConfigError(
            "S3_BUCKET not configured".to_string(),
        ));
    }
    if storage.s3_region.is_empty() {
        return Err(StorageError::ConfigError(
            "S3_REGION or AWS_REGION not configured".to_string(),
        ));
    }

    let s3 = S3Storage::new(
        storage.s3_bucket.clone(),
        storage.s3_region.clone(),
        storage.s3_endpoint.clone(),
        storage.s3_cf_distribution.clone(),
    )?;

    tracing::info!(
        bucket = %storage.s3_bucket,
        region = %storage.s3_region,
        distribution = ?storage.s3_cf_distribution,
        "Video storage initialized"
    );

    Ok(Arc::new(s3))
}

#[cfg(not(feature = "storage-s3"))]
pub async fn create_video_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

/// Create the thumbnail store, or `None` when thumbnails are inlined into
/// the record.
pub async fn create_thumbnail_storage(
    config: &Config,
) -> StorageResult<Option<Arc<dyn Storage>>> {
    match config.thumbnail_storage() {
        ThumbnailStorageMode::Inline => Ok(None),

        #[cfg(feature = "storage-local")]
        ThumbnailStorageMode::Local => {
            let root = config.assets_root().ok_or_else(|| {
                StorageError::ConfigError("ASSETS_ROOT not configured".to_string())
            })?;
            let storage =
                LocalStorage::new(root, config.storage.assets_base_url.clone()).await?;
            Ok(Some(Arc::new(storage)))
        }

        #[cfg(not(feature = "storage-local"))]
        ThumbnailStorageMode::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
