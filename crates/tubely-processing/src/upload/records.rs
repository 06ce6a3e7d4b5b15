use async_trait::async_trait;
use tubely_core::Video;
use uuid::Uuid;

/// The video record collaborator.
///
/// `update_video` overwrites the stored record; concurrent uploads for the
/// same video race and the last successful commit wins.
#[async_trait]
pub trait VideoRecords: Send + Sync {
    async fn get_video(&self, id: Uuid) -> anyhow::Result<Option<Video>>;

    async fn create_video(&self, video: &Video) -> anyhow::Result<Video>;

    async fn update_video(&self, video: &Video) -> anyhow::Result<Video>;
}
