//! Storage backends, media tools and the upload pipeline

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{
    FfmpegFastStart, FfprobeProber, ThumbnailStore, UploadPipeline, VideoRecords,
};
use tubely_storage::{create_thumbnail_storage, create_video_storage};

/// Wire the upload pipeline against the configured backends.
pub async fn setup_pipeline(
    config: &Config,
    records: Arc<dyn VideoRecords>,
) -> Result<UploadPipeline> {
    tokio::fs::create_dir_all(&config.media.scratch_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create scratch directory {}",
                config.media.scratch_dir.display()
            )
        })?;

    let video_storage = create_video_storage(config)
        .await
        .context("Failed to initialize video storage")?;

    let thumbnail_store = match create_thumbnail_storage(config)
        .await
        .context("Failed to initialize thumbnail storage")?
    {
        Some(storage) => {
            tracing::info!(
                backend = %storage.backend_type(),
                base_url = %config.storage.assets_base_url,
                "Thumbnails stored locally"
            );
            ThumbnailStore::Local(storage)
        }
        None => {
            tracing::info!("Thumbnails embedded as data URIs");
            ThumbnailStore::Inline
        }
    };

    let prober = FfprobeProber::new(config.ffprobe_path()).context("Invalid FFPROBE_PATH")?;
    let optimizer = FfmpegFastStart::new(config.ffmpeg_path()).context("Invalid FFMPEG_PATH")?;

    Ok(UploadPipeline::new(
        config,
        Arc::new(prober),
        Arc::new(optimizer),
        video_storage,
        thumbnail_store,
        records,
    ))
}
