use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tubely_core::constants::FAST_START_SUFFIX;
use tubely_core::{Video, VideoGeometry};
use tubely_processing::{
    MediaProbe, OptimizeError, ProbeError, ScratchFile, StreamOptimizer, VideoRecords,
};
use uuid::Uuid;

/// Reports the same geometry for every file.
pub struct FixedProbe(pub VideoGeometry);

#[async_trait]
impl MediaProbe for FixedProbe {
    async fn probe(&self, _path: &Path) -> Result<VideoGeometry, ProbeError> {
        Ok(self.0)
    }
}

/// Stands in for the fast-start rewrite by copying the input.
pub struct CopyOptimizer;

#[async_trait]
impl StreamOptimizer for CopyOptimizer {
    async fn optimize(&self, input: &Path) -> Result<ScratchFile, OptimizeError> {
        let output =
            ScratchFile::derived_from(input, FAST_START_SUFFIX).map_err(OptimizeError::Spawn)?;
        tokio::fs::copy(input, output.path())
            .await
            .map_err(OptimizeError::Spawn)?;
        Ok(output)
    }
}

#[derive(Default)]
pub struct MemoryRecords {
    videos: Mutex<HashMap<Uuid, Video>>,
}

impl MemoryRecords {
    pub fn insert(&self, video: Video) -> Uuid {
        let id = video.id;
        self.videos.lock().unwrap().insert(id, video);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl VideoRecords for MemoryRecords {
    async fn get_video(&self, id: Uuid) -> anyhow::Result<Option<Video>> {
        Ok(self.get(id))
    }

    async fn create_video(&self, video: &Video) -> anyhow::Result<Video> {
        self.insert(video.clone());
        Ok(video.clone())
    }

    async fn update_video(&self, video: &Video) -> anyhow::Result<Video> {
        let mut videos = self.videos.lock().unwrap();
        if !videos.contains_key(&video.id) {
            anyhow::bail!("video {} does not exist", video.id);
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }
}
