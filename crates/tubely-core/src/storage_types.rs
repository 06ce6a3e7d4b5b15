use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Reported by each `Storage` implementation so startup logs and locators can
/// tell which tier an asset landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// How thumbnails are persisted.
///
/// `Local` copies the image under the assets root and hands back a servable
/// path. `Inline` embeds the bytes in the record as a `data:` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailStorageMode {
    Local,
    Inline,
}

impl FromStr for ThumbnailStorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(ThumbnailStorageMode::Local),
            "inline" => Ok(ThumbnailStorageMode::Inline),
            _ => Err(anyhow::anyhow!(
                "Invalid thumbnail storage mode: {} (expected 'local' or 'inline')",
                s
            )),
        }
    }
}

impl Display for ThumbnailStorageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ThumbnailStorageMode::Local => write!(f, "local"),
            ThumbnailStorageMode::Inline => write!(f, "inline"),
        }
    }
}
