//! Tubely Processing Library
//!
//! Everything between "bytes arrived" and "record updated": media-type
//! validation, scratch staging, the ffprobe/ffmpeg capabilities, object
//! placement and the upload orchestrator that sequences them.

pub mod placement;
pub mod scratch;
pub mod traits;
pub mod upload;
pub mod validator;
#[cfg(feature = "video")]
pub mod video;

pub use placement::place;
pub use scratch::ScratchFile;
pub use traits::{classify_orientation, MediaProbe, OptimizeError, ProbeError, StreamOptimizer};
pub use upload::{
    ThumbnailStore, UploadError, UploadPipeline, UploadStage, UploadedAsset, VideoRecords,
};
pub use validator::{parse_media_type, MediaType, MediaValidator, ValidationError};
#[cfg(feature = "video")]
pub use video::{FfmpegFastStart, FfprobeProber, ToolPathError};
