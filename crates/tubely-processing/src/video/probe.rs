use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tubely_core::VideoGeometry;

use super::{exit_status, stderr_excerpt, validate_tool_path, ToolPathError};
use crate::traits::{MediaProbe, ProbeError};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Extract the first stream's geometry from `ffprobe -print_format json` output.
pub fn parse_probe_output(stdout: &[u8]) -> Result<VideoGeometry, ProbeError> {
    let output: ProbeOutput = serde_json::from_slice(stdout).map_err(ProbeError::Parse)?;
    let first = output.streams.first().ok_or(ProbeError::NoStreams)?;
    Ok(VideoGeometry::new(first.width, first.height))
}

/// [`MediaProbe`] backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ToolPathError> {
        let ffprobe_path = ffprobe_path.into();
        validate_tool_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProbe for FfprobeProber {
    #[tracing::instrument(
        skip(self, path),
        fields(process.executable.name = "ffprobe", path = %path.display())
    )]
    async fn probe(&self, path: &Path) -> Result<VideoGeometry, ProbeError> {
        let start = Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .args(["-select_streams", "v:0"])
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            let err = ProbeError::ProcessFailed {
                status: exit_status(&output),
                stderr: stderr_excerpt(&output),
            };
            tracing::warn!(error = %err, "ffprobe failed");
            return Err(err);
        }

        let geometry = parse_probe_output(&output.stdout)?;

        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffprobe completed"
        );

        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_first_stream() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_type": "video", "width": 1280, "height": 720},
                {"index": 1, "codec_type": "video", "width": 720, "height": 1280}
            ]
        }"#;
        assert_eq!(parse_probe_output(json).unwrap(), VideoGeometry::new(1280, 720));
    }

    #[test]
    fn test_missing_dimensions_default_to_zero() {
        let json = br#"{"streams": [{"codec_type": "video"}]}"#;
        let geometry = parse_probe_output(json).unwrap();
        assert_eq!(geometry, VideoGeometry::new(0, 0));
        assert_eq!(geometry.orientation(), tubely_core::OrientationClass::Other);
    }

    #[test]
    fn test_empty_streams_is_an_error() {
        assert!(matches!(
            parse_probe_output(br#"{"streams": []}"#),
            Err(ProbeError::NoStreams)
        ));
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(ProbeError::NoStreams)
        ));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            parse_probe_output(b"Invalid data found when processing input"),
            Err(ProbeError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unsafe_binary_path() {
        assert!(FfprobeProber::new("ffprobe && curl evil").is_err());
        assert!(FfprobeProber::new("ffprobe").is_ok());
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let prober = FfprobeProber::new("/nonexistent/tubely-ffprobe").unwrap();
        let err = prober.probe(Path::new("video.mp4")).await.unwrap_err();
        assert!(matches!(err, ProbeError::Spawn(_)));
    }
}
