//! Types for the upload pipeline.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::pin::Pin;
use tokio::io::AsyncRead;

/// One inbound file: its declared content type and a body that can be read
/// exactly once.
pub struct UploadedAsset<'a> {
    pub content_type: String,
    pub body: Pin<Box<dyn AsyncRead + Send + 'a>>,
}

impl<'a> UploadedAsset<'a> {
    pub fn new(content_type: impl Into<String>, body: impl AsyncRead + Send + 'a) -> Self {
        Self {
            content_type: content_type.into(),
            body: Box::pin(body),
        }
    }
}

impl std::fmt::Debug for UploadedAsset<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UploadedAsset")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Pipeline stages, in order. A failed upload reports the stage it was
/// trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadStage {
    Received,
    Validated,
    Staged,
    Optimized,
    Classified,
    Placed,
    Uploaded,
    Committed,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            UploadStage::Received => "received",
            UploadStage::Validated => "validated",
            UploadStage::Staged => "staged",
            UploadStage::Optimized => "optimized",
            UploadStage::Classified => "classified",
            UploadStage::Placed => "placed",
            UploadStage::Uploaded => "uploaded",
            UploadStage::Committed => "committed",
        };
        f.write_str(name)
    }
}
