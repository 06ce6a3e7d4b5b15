//! Capabilities the upload orchestrator needs from the media toolchain.
//!
//! The ffprobe/ffmpeg implementations live in [`crate::video`]; tests swap in
//! fakes.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use thiserror::Error;
use tubely_core::{OrientationClass, VideoGeometry};

use crate::scratch::ScratchFile;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to start probe tool: {0}")]
    Spawn(#[source] io::Error),

    #[error("Probe tool exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("Probe output is not valid stream metadata: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Probe reported no video streams")]
    NoStreams,
}

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Failed to start optimize tool: {0}")]
    Spawn(#[source] io::Error),

    #[error("Optimize tool exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },
}

/// Reads the geometry of the first video stream in a file.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<VideoGeometry, ProbeError>;
}

/// Rewrites a container so its index sits at the front of the file.
///
/// The returned [`ScratchFile`] is a new file; `input` is left untouched.
#[async_trait]
pub trait StreamOptimizer: Send + Sync {
    async fn optimize(&self, input: &Path) -> Result<ScratchFile, OptimizeError>;
}

/// Probe `path` and bucket it by aspect ratio.
pub async fn classify_orientation(
    probe: &dyn MediaProbe,
    path: &Path,
) -> Result<OrientationClass, ProbeError> {
    let geometry = probe.probe(path).await?;
    let orientation = geometry.orientation();
    tracing::debug!(
        width = geometry.width,
        height = geometry.height,
        orientation = %orientation,
        "Classified video orientation"
    );
    Ok(orientation)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<VideoGeometry>);

    #[async_trait]
    impl MediaProbe for FixedProbe {
        async fn probe(&self, _path: &Path) -> Result<VideoGeometry, ProbeError> {
            self.0.ok_or(ProbeError::NoStreams)
        }
    }

    #[tokio::test]
    async fn test_classify_uses_probed_geometry() {
        let path = Path::new("unused.mp4");
        let cases = [
            (1920, 1080, OrientationClass::Landscape),
            (1080, 1920, OrientationClass::Portrait),
            (1000, 1000, OrientationClass::Other),
        ];
        for (w, h, expected) in cases {
            let probe = FixedProbe(Some(VideoGeometry::new(w, h)));
            assert_eq!(classify_orientation(&probe, path).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_classify_propagates_probe_failure() {
        let probe = FixedProbe(None);
        assert!(matches!(
            classify_orientation(&probe, Path::new("x.mp4")).await,
            Err(ProbeError::NoStreams)
        ));
    }
}
