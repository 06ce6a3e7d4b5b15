use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// S3 storage implementation
///
/// Objects are streamed from disk through a multipart writer, so a 1 GiB
/// video never sits in memory.
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    distribution: Option<String>, // CDN host fronting the bucket
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `distribution` - Optional CDN host; when set, locators are `https://{distribution}/{key}`
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS environment variables.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(
            Arc::new(store),
            bucket,
            region,
            endpoint_url,
            distribution,
        ))
    }

    /// Wrap an already-built object store.
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution: Option<String>,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            distribution: distribution.filter(|d| !d.trim().is_empty()),
        }
    }

    /// Generate public URL for S3 object
    ///
    /// Preference order: CDN distribution, custom endpoint (path-style),
    /// then the virtual-hosted AWS URL.
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref distribution) = self.distribution {
            let host = distribution
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            format!("https://{}/{}", host, key)
        } else if let Some(ref endpoint) = self.endpoint_url {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    async fn stream_to(
        &self,
        location: &ObjectPath,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<u64> {
        let mut file = File::open(source).await?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let mut writer =
            BufWriter::new(Arc::clone(&self.store), location.clone()).with_attributes(attributes);

        let copied = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(error = %abort_err, key = %location, "Failed to abort S3 upload");
                }
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        if let Err(e) = writer.shutdown().await {
            if let Err(abort_err) = writer.abort().await {
                tracing::warn!(error = %abort_err, key = %location, "Failed to abort S3 upload");
            }
            return Err(StorageError::UploadFailed(e.to_string()));
        }

        Ok(copied)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_file(
        &self,
        key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(key)?;
        let location = ObjectPath::from(key);
        let start = std::time::Instant::now();

        let size = self
            .stream_to(&location, source, content_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                e
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
