use async_trait::async_trait;
use tubely_core::Video;
use tubely_processing::VideoRecords;
use uuid::Uuid;

use super::VideoRepository;

#[async_trait]
impl VideoRecords for VideoRepository {
    async fn get_video(&self, id: Uuid) -> anyhow::Result<Option<Video>> {
        Ok(VideoRepository::get_video(self, id).await?)
    }

    async fn create_video(&self, video: &Video) -> anyhow::Result<Video> {
        Ok(VideoRepository::create_video(self, video).await?)
    }

    async fn update_video(&self, video: &Video) -> anyhow::Result<Video> {
        Ok(VideoRepository::update_video(self, video).await?)
    }
}
