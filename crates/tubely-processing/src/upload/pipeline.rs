use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tubely_core::{AssetKind, Config, Video};
use tubely_storage::{generate_key, Storage};
use uuid::Uuid;

use super::error::UploadError;
use super::records::VideoRecords;
use super::types::{UploadStage, UploadedAsset};
use crate::placement::place;
use crate::scratch::ScratchFile;
use crate::traits::{classify_orientation, MediaProbe, StreamOptimizer};
use crate::validator::{MediaType, MediaValidator};

/// Where thumbnails go.
#[derive(Clone)]
pub enum ThumbnailStore {
    /// Copied into a storage backend under a fresh key.
    Local(Arc<dyn Storage>),
    /// Embedded in the record as a `data:` URI.
    Inline,
}

/// Sequences one upload from request body to committed record.
///
/// Stages run strictly in order for a given request; separate requests share
/// nothing but the storage backends and the record store.
#[derive(Clone)]
pub struct UploadPipeline {
    scratch_dir: PathBuf,
    video_validator: MediaValidator,
    thumbnail_validator: MediaValidator,
    prober: Arc<dyn MediaProbe>,
    optimizer: Arc<dyn StreamOptimizer>,
    video_storage: Arc<dyn Storage>,
    thumbnail_store: ThumbnailStore,
    records: Arc<dyn VideoRecords>,
}

impl UploadPipeline {
    pub fn new(
        config: &Config,
        prober: Arc<dyn MediaProbe>,
        optimizer: Arc<dyn StreamOptimizer>,
        video_storage: Arc<dyn Storage>,
        thumbnail_store: ThumbnailStore,
        records: Arc<dyn VideoRecords>,
    ) -> Self {
        Self {
            scratch_dir: config.media.scratch_dir.clone(),
            video_validator: MediaValidator::for_asset(config, AssetKind::Video),
            thumbnail_validator: MediaValidator::for_asset(config, AssetKind::Thumbnail),
            prober,
            optimizer,
            video_storage,
            thumbnail_store,
            records,
        }
    }

    pub fn records(&self) -> &Arc<dyn VideoRecords> {
        &self.records
    }

    /// Attach a video file to `video_id` on behalf of `user_id`.
    #[tracing::instrument(
        skip(self, asset),
        fields(video_id = %video_id, user_id = %user_id, content_type = %asset.content_type)
    )]
    pub async fn upload_video(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        asset: UploadedAsset<'_>,
    ) -> Result<Video, UploadError> {
        let start = Instant::now();
        let result = self.run_video(video_id, user_id, asset).await;
        report(AssetKind::Video, &result, start);
        result
    }

    /// Attach a thumbnail image to `video_id` on behalf of `user_id`.
    #[tracing::instrument(
        skip(self, asset),
        fields(video_id = %video_id, user_id = %user_id, content_type = %asset.content_type)
    )]
    pub async fn upload_thumbnail(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        asset: UploadedAsset<'_>,
    ) -> Result<Video, UploadError> {
        let start = Instant::now();
        let result = self.run_thumbnail(video_id, user_id, asset).await;
        report(AssetKind::Thumbnail, &result, start);
        result
    }

    async fn run_video(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        asset: UploadedAsset<'_>,
    ) -> Result<Video, UploadError> {
        let mut video = self.authorize(video_id, user_id).await?;
        let media_type = self.video_validator.validate(&asset.content_type)?;
        stage_reached(UploadStage::Validated);

        let staged = self.stage(&media_type, asset).await?;

        let optimized = self.optimizer.optimize(staged.path()).await?;
        drop(staged);
        stage_reached(UploadStage::Optimized);

        let orientation = classify_orientation(self.prober.as_ref(), optimized.path()).await?;
        stage_reached(UploadStage::Classified);

        let key = generate_key(media_type.extension())?;
        let object_path = place(Some(orientation), &key);
        tracing::debug!(stage = %UploadStage::Placed, path = %object_path, "Upload stage reached");

        let locator = self
            .video_storage
            .put_file(&object_path, optimized.path(), media_type.essence())
            .await?;
        drop(optimized);
        stage_reached(UploadStage::Uploaded);

        video.set_locator(AssetKind::Video, locator);
        self.commit(&video).await
    }

    async fn run_thumbnail(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        asset: UploadedAsset<'_>,
    ) -> Result<Video, UploadError> {
        let mut video = self.authorize(video_id, user_id).await?;
        let media_type = self.thumbnail_validator.validate(&asset.content_type)?;
        stage_reached(UploadStage::Validated);

        let staged = self.stage(&media_type, asset).await?;

        let locator = match &self.thumbnail_store {
            ThumbnailStore::Local(storage) => {
                let key = generate_key(media_type.extension())?;
                let object_path = place(None, &key);
                tracing::debug!(stage = %UploadStage::Placed, path = %object_path, "Upload stage reached");
                storage
                    .put_file(&object_path, staged.path(), media_type.essence())
                    .await?
            }
            ThumbnailStore::Inline => {
                let bytes = staged.read_to_end().await.map_err(UploadError::Staging)?;
                format!("data:{};base64,{}", media_type.essence(), STANDARD.encode(bytes))
            }
        };
        drop(staged);
        stage_reached(UploadStage::Uploaded);

        video.set_locator(AssetKind::Thumbnail, locator);
        self.commit(&video).await
    }

    /// Load the record and check that `user_id` owns it.
    async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, UploadError> {
        let video = self
            .records
            .get_video(video_id)
            .await
            .map_err(UploadError::Lookup)?
            .ok_or(UploadError::VideoNotFound(video_id))?;

        if !video.is_owned_by(user_id) {
            return Err(UploadError::NotOwner { video_id, user_id });
        }

        stage_reached(UploadStage::Received);
        Ok(video)
    }

    async fn stage(
        &self,
        media_type: &MediaType,
        asset: UploadedAsset<'_>,
    ) -> Result<ScratchFile, UploadError> {
        let mut body = asset.body;
        let suffix = format!(".{}", media_type.extension());
        let (staged, size) = ScratchFile::stage(&self.scratch_dir, &suffix, &mut body)
            .await
            .map_err(UploadError::Staging)?;

        tracing::debug!(
            stage = %UploadStage::Staged,
            size_bytes = size,
            "Upload stage reached"
        );
        Ok(staged)
    }

    async fn commit(&self, video: &Video) -> Result<Video, UploadError> {
        let committed = self
            .records
            .update_video(video)
            .await
            .map_err(UploadError::Commit)?;
        stage_reached(UploadStage::Committed);
        Ok(committed)
    }
}

fn stage_reached(stage: UploadStage) {
    tracing::debug!(stage = %stage, "Upload stage reached");
}

fn report(kind: AssetKind, result: &Result<Video, UploadError>, start: Instant) {
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(video) => tracing::info!(
            kind = %kind,
            locator_field = kind.locator_field(),
            duration_ms,
            video_id = %video.id,
            "Upload completed"
        ),
        Err(e) if e.is_client_error() => tracing::warn!(
            kind = %kind,
            stage = %e.stage(),
            error = %e,
            duration_ms,
            "Upload rejected"
        ),
        Err(UploadError::Commit(source)) => tracing::error!(
            kind = %kind,
            stage = %UploadStage::Committed,
            error = ?source,
            duration_ms,
            "Upload stored but record commit failed; object is orphaned"
        ),
        Err(e) => tracing::error!(
            kind = %kind,
            stage = %e.stage(),
            error = %e,
            duration_ms,
            "Upload failed"
        ),
    }
}
