//! Test helpers: build AppState and router for integration tests.
//!
//! Records live in memory and videos go to an in-memory object store, so no
//! database or S3 endpoint is needed. ffmpeg/ffprobe are replaced by fakes.

#![allow(dead_code)]

pub mod auth;
pub mod fakes;

use axum_test::TestServer;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::setup::routes::build_router;
use tubely_api::AppState;
use tubely_core::{Config, VideoGeometry};
use tubely_processing::{ThumbnailStore, UploadPipeline};
use tubely_storage::{create_thumbnail_storage, S3Storage, Storage};

use fakes::{CopyOptimizer, FixedProbe, MemoryRecords};

pub const TEST_JWT_SECRET: &str = "tubely-test-secret";
pub const CDN_HOST: &str = "cdn.example.com";

/// Knobs for a test app.
pub struct AppOptions {
    pub geometry: VideoGeometry,
    pub thumbnail_mode: &'static str,
    pub max_thumbnail_mb: &'static str,
    pub environment: &'static str,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            geometry: VideoGeometry::new(1920, 1080),
            thumbnail_mode: "local",
            max_thumbnail_mb: "10",
            environment: "development",
        }
    }
}

/// Test application: server plus the backends behind it.
pub struct TestApp {
    pub server: TestServer,
    pub objects: Arc<dyn ObjectStore>,
    pub records: Arc<MemoryRecords>,
    pub scratch: TempDir,
    pub _assets: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(scratch: &TempDir, assets: &TempDir, options: &AppOptions) -> Config {
    let scratch_dir = scratch.path().to_string_lossy().to_string();
    let assets_root = assets.path().to_string_lossy().to_string();
    let vars: HashMap<&str, String> = [
        ("JWT_SECRET", TEST_JWT_SECRET.to_string()),
        ("DATABASE_URL", "postgres://localhost/tubely_test".to_string()),
        ("S3_BUCKET", "tubely-test".to_string()),
        ("S3_REGION", "us-east-1".to_string()),
        ("S3_CF_DISTRO", CDN_HOST.to_string()),
        ("SCRATCH_DIR", scratch_dir),
        ("ASSETS_ROOT", assets_root),
        ("THUMBNAIL_STORAGE", options.thumbnail_mode.to_string()),
        ("MAX_THUMBNAIL_SIZE_MB", options.max_thumbnail_mb.to_string()),
        ("ENVIRONMENT", options.environment.to_string()),
    ]
    .into_iter()
    .collect();

    let config = Config::from_source(|key| vars.get(key).cloned()).expect("test config");
    config.validate().expect("valid test config");
    config
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(AppOptions::default()).await
}

pub async fn setup_test_app_with(options: AppOptions) -> TestApp {
    let scratch = TempDir::new().expect("scratch dir");
    let assets = TempDir::new().expect("assets dir");
    let config = test_config(&scratch, &assets, &options);

    let objects: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
    let video_storage: Arc<dyn Storage> = Arc::new(S3Storage::with_store(
        Arc::clone(&objects),
        config.storage.s3_bucket.clone(),
        config.storage.s3_region.clone(),
        None,
        config.storage.s3_cf_distribution.clone(),
    ));

    let thumbnail_store = match create_thumbnail_storage(&config)
        .await
        .expect("thumbnail storage")
    {
        Some(storage) => ThumbnailStore::Local(storage),
        None => ThumbnailStore::Inline,
    };

    let records = Arc::new(MemoryRecords::default());
    let pipeline = UploadPipeline::new(
        &config,
        Arc::new(FixedProbe(options.geometry)),
        Arc::new(CopyOptimizer),
        video_storage,
        thumbnail_store,
        records.clone(),
    );

    let state = Arc::new(AppState::new(config.clone(), records.clone(), pipeline));
    let router = build_router(&config, state);
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        objects,
        records,
        scratch,
        _assets: assets,
    }
}
