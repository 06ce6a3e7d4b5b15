//! Configuration module
//!
//! Configuration is read once at startup and passed down explicitly. Nothing
//! below the binary reads the environment on its own.

use std::env;
use std::path::PathBuf;

use crate::storage_types::ThumbnailStorageMode;

// Common constants
const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const VIDEO_ALLOWED_CONTENT_TYPES: &str = "video/mp4";
const THUMBNAIL_ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png";

/// Server, auth and database settings.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub log_format: String,
}

/// Media intake limits and external tool locations.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub scratch_dir: PathBuf,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
    pub video_allowed_content_types: Vec<String>,
    pub thumbnail_allowed_content_types: Vec<String>,
}

/// Where uploaded assets end up.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub s3_cf_distribution: Option<String>,
    pub thumbnail_storage: ThumbnailStorageMode,
    pub assets_root: Option<PathBuf>,
    pub assets_base_url: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub media: MediaConfig,
    pub storage: StorageConfig,
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port: u16 = var("PORT", &SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let base = BaseConfig {
            server_port,
            environment,
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: var("DB_MAX_CONNECTIONS", &MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: var("DB_TIMEOUT_SECONDS", &CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            log_format: var("LOG_FORMAT", "text").to_lowercase(),
        };

        let media = MediaConfig {
            ffmpeg_path: var("FFMPEG_PATH", "ffmpeg"),
            ffprobe_path: var("FFPROBE_PATH", "ffprobe"),
            scratch_dir: lookup("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            max_video_size_bytes: var("MAX_VIDEO_SIZE_MB", &MAX_VIDEO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            max_thumbnail_size_bytes: var(
                "MAX_THUMBNAIL_SIZE_MB",
                &MAX_THUMBNAIL_SIZE_MB.to_string(),
            )
            .parse::<usize>()
            .unwrap_or(MAX_THUMBNAIL_SIZE_MB)
                * 1024
                * 1024,
            video_allowed_content_types: parse_list(&var(
                "VIDEO_ALLOWED_CONTENT_TYPES",
                VIDEO_ALLOWED_CONTENT_TYPES,
            )),
            thumbnail_allowed_content_types: parse_list(&var(
                "THUMBNAIL_ALLOWED_CONTENT_TYPES",
                THUMBNAIL_ALLOWED_CONTENT_TYPES,
            )),
        };

        let thumbnail_storage: ThumbnailStorageMode = var("THUMBNAIL_STORAGE", "local").parse()?;

        let storage = StorageConfig {
            s3_bucket: var("S3_BUCKET", ""),
            s3_region: lookup("S3_REGION")
                .or_else(|| lookup("AWS_REGION"))
                .unwrap_or_default(),
            s3_endpoint: lookup("S3_ENDPOINT").filter(|s| !s.is_empty()),
            s3_cf_distribution: lookup("S3_CF_DISTRO").filter(|s| !s.is_empty()),
            thumbnail_storage,
            assets_root: lookup("ASSETS_ROOT").map(PathBuf::from),
            assets_base_url: lookup("ASSETS_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}/assets", server_port)),
        };

        Ok(Config {
            base,
            media,
            storage,
        })
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }
        if self.storage.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must be set"));
        }
        if self.storage.s3_region.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_REGION or AWS_REGION must be set"));
        }
        if self.storage.thumbnail_storage == ThumbnailStorageMode::Local
            && self.storage.assets_root.is_none()
        {
            return Err(anyhow::anyhow!(
                "ASSETS_ROOT must be set when THUMBNAIL_STORAGE=local"
            ));
        }
        if self.media.video_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("VIDEO_ALLOWED_CONTENT_TYPES must not be empty"));
        }
        if self.media.thumbnail_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_ALLOWED_CONTENT_TYPES must not be empty"
            ));
        }
        if self.media.max_video_size_bytes == 0 || self.media.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.base.jwt_secret
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.base.db_timeout_seconds
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.media.ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.media.ffprobe_path
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.media.max_video_size_bytes
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.media.max_thumbnail_size_bytes
    }

    pub fn thumbnail_storage(&self) -> ThumbnailStorageMode {
        self.storage.thumbnail_storage
    }

    pub fn assets_root(&self) -> Option<&std::path::Path> {
        self.storage.assets_root.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| map.get(key).cloned())
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("JWT_SECRET", "secret"),
        ("DATABASE_URL", "postgres://localhost/tubely"),
        ("S3_BUCKET", "tubely-videos"),
        ("S3_REGION", "us-east-1"),
        ("ASSETS_ROOT", "./assets"),
    ];

    #[test]
    fn test_defaults_match_upload_contract() {
        let config = config_from(REQUIRED).unwrap();
        config.validate().unwrap();

        assert_eq!(config.server_port(), 8091);
        assert_eq!(config.max_video_size_bytes(), 1 << 30);
        assert_eq!(config.max_thumbnail_size_bytes(), 10 << 20);
        assert_eq!(config.media.video_allowed_content_types, vec!["video/mp4"]);
        assert_eq!(
            config.media.thumbnail_allowed_content_types,
            vec!["image/jpeg", "image/png"]
        );
        assert_eq!(config.thumbnail_storage(), ThumbnailStorageMode::Local);
        assert_eq!(config.storage.assets_base_url, "http://localhost:8091/assets");
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_jwt_secret_is_an_error() {
        let err = config_from(&[("DATABASE_URL", "postgres://localhost/tubely")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_local_thumbnails_require_assets_root() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "ASSETS_ROOT")
            .collect();
        let config = config_from(&vars).unwrap();
        assert!(config.validate().is_err());

        let mut inline = vars.clone();
        inline.push(("THUMBNAIL_STORAGE", "inline"));
        let config = config_from(&inline).unwrap();
        config.validate().unwrap();
        assert_eq!(config.thumbnail_storage(), ThumbnailStorageMode::Inline);
    }

    #[test]
    fn test_region_falls_back_to_aws_region() {
        let mut vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "S3_REGION")
            .collect();
        vars.push(("AWS_REGION", "eu-west-1"));
        let config = config_from(&vars).unwrap();
        assert_eq!(config.storage.s3_region, "eu-west-1");
    }

    #[test]
    fn test_content_type_lists_are_normalized() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("THUMBNAIL_ALLOWED_CONTENT_TYPES", " Image/PNG , ,image/webp"));
        let config = config_from(&vars).unwrap();
        assert_eq!(
            config.media.thumbnail_allowed_content_types,
            vec!["image/png", "image/webp"]
        );
    }

    #[test]
    fn test_invalid_thumbnail_mode_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("THUMBNAIL_STORAGE", "s3"));
        assert!(config_from(&vars).is_err());
    }
}
