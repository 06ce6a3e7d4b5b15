//! FFmpeg-backed media capabilities

pub mod faststart;
pub mod probe;

pub use faststart::FfmpegFastStart;
pub use probe::{parse_probe_output, FfprobeProber};

use std::process::Output;
use thiserror::Error;

/// Longest stderr excerpt carried into an error.
const STDERR_EXCERPT_LEN: usize = 512;

#[derive(Debug, Error)]
#[error("Invalid tool path {path:?}: {reason}")]
pub struct ToolPathError {
    pub path: String,
    pub reason: &'static str,
}

/// Refuse tool paths that could smuggle in shell syntax or walk out of a
/// configured directory.
pub fn validate_tool_path(path: &str) -> Result<(), ToolPathError> {
    let reject = |reason| {
        Err(ToolPathError {
            path: path.to_string(),
            reason,
        })
    };

    if path.trim().is_empty() {
        return reject("path is empty");
    }
    if path.contains("..") {
        return reject("path traversal is not allowed");
    }
    if path
        .chars()
        .any(|c| matches!(c, ';' | '&' | '|' | '$' | '`' | '>' | '<' | '\n' | '\r' | '\0'))
    {
        return reject("shell metacharacters are not allowed");
    }
    Ok(())
}

pub(crate) fn exit_status(output: &Output) -> String {
    match output.status.code() {
        Some(code) => format!("exit code {}", code),
        None => "signal".to_string(),
    }
}

pub(crate) fn stderr_excerpt(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    match trimmed.char_indices().nth(STDERR_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
