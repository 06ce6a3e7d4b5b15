use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tubely_core::constants::FAST_START_SUFFIX;

use super::{exit_status, stderr_excerpt, validate_tool_path, ToolPathError};
use crate::scratch::ScratchFile;
use crate::traits::{OptimizeError, StreamOptimizer};

/// [`StreamOptimizer`] that runs `ffmpeg -c copy -movflags faststart`.
///
/// Streams are copied, not re-encoded, so the rewrite is lossless.
#[derive(Debug, Clone)]
pub struct FfmpegFastStart {
    ffmpeg_path: String,
}

impl FfmpegFastStart {
    pub fn new(ffmpeg_path: impl Into<String>) -> Result<Self, ToolPathError> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_tool_path(&ffmpeg_path)?;
        Ok(Self { ffmpeg_path })
    }
}

#[async_trait]
impl StreamOptimizer for FfmpegFastStart {
    #[tracing::instrument(
        skip(self, input),
        fields(process.executable.name = "ffmpeg", input = %input.display())
    )]
    async fn optimize(&self, input: &Path) -> Result<ScratchFile, OptimizeError> {
        let output_file =
            ScratchFile::derived_from(input, FAST_START_SUFFIX).map_err(OptimizeError::Spawn)?;
        let start = Instant::now();

        let output = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-nostdin", "-y"])
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(output_file.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(OptimizeError::Spawn)?;

        if !output.status.success() {
            let err = OptimizeError::ProcessFailed {
                status: exit_status(&output),
                stderr: stderr_excerpt(&output),
            };
            tracing::warn!(error = %err, "ffmpeg fast-start rewrite failed");
            return Err(err);
        }

        tracing::debug!(
            output = %output_file.path().display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffmpeg fast-start rewrite completed"
        );

        Ok(output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::VideoGeometry;

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error_and_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"x").unwrap();

        let optimizer = FfmpegFastStart::new("/nonexistent/tubely-ffmpeg").unwrap();
        let err = optimizer.optimize(&input).await.unwrap_err();
        assert!(matches!(err, OptimizeError::Spawn(_)));
        assert!(!dir.path().join("in.mp4.processing").exists());
        assert!(input.exists());
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg and ffprobe on PATH"]
    async fn test_rewrites_generated_clip() {
        use crate::traits::MediaProbe;
        use crate::video::FfprobeProber;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        let status = std::process::Command::new("ffmpeg")
            .args(["-hide_banner", "-loglevel", "error", "-f", "lavfi"])
            .args(["-i", "testsrc=size=1280x720:rate=10:duration=1"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(&input)
            .status()
            .unwrap();
        assert!(status.success());

        let optimized = FfmpegFastStart::new("ffmpeg")
            .unwrap()
            .optimize(&input)
            .await
            .unwrap();
        assert!(optimized.path().exists());

        let geometry = FfprobeProber::new("ffprobe")
            .unwrap()
            .probe(optimized.path())
            .await
            .unwrap();
        assert_eq!(geometry, VideoGeometry::new(1280, 720));

        let out_path = optimized.path().to_path_buf();
        drop(optimized);
        assert!(!out_path.exists());
    }
}
