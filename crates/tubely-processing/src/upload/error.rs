use std::io;
use thiserror::Error;
use tubely_storage::{KeyError, StorageError};
use uuid::Uuid;

use super::types::UploadStage;
use crate::traits::{OptimizeError, ProbeError};
use crate::validator::ValidationError;

/// Why an upload did not complete. One variant per pipeline step.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Video {0} not found")]
    VideoNotFound(Uuid),

    #[error("User {user_id} is not the owner of video {video_id}")]
    NotOwner { video_id: Uuid, user_id: Uuid },

    #[error("Failed to load video record")]
    Lookup(#[source] anyhow::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to stage upload: {0}")]
    Staging(#[source] io::Error),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Store(#[from] StorageError),

    #[error("Failed to commit video record")]
    Commit(#[source] anyhow::Error),
}

impl UploadError {
    /// The stage the pipeline was trying to reach when it failed.
    pub fn stage(&self) -> UploadStage {
        match self {
            UploadError::VideoNotFound(_) | UploadError::NotOwner { .. } | UploadError::Lookup(_) => {
                UploadStage::Received
            }
            UploadError::Validation(_) => UploadStage::Validated,
            UploadError::Staging(_) => UploadStage::Staged,
            UploadError::Optimize(_) => UploadStage::Optimized,
            UploadError::Probe(_) => UploadStage::Classified,
            UploadError::Key(_) => UploadStage::Placed,
            UploadError::Store(_) => UploadStage::Uploaded,
            UploadError::Commit(_) => UploadStage::Committed,
        }
    }

    /// Client mistakes, as opposed to server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::VideoNotFound(_) | UploadError::NotOwner { .. } | UploadError::Validation(_)
        )
    }
}
