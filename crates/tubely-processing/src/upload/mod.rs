//! Upload orchestration: authorize → validate → stage → optimize →
//! classify → place → upload → commit.

mod error;
mod pipeline;
mod records;
mod types;

pub use error::UploadError;
pub use pipeline::{ThumbnailStore, UploadPipeline};
pub use records::VideoRecords;
pub use types::{UploadStage, UploadedAsset};
