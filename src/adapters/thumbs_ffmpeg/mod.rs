//! FFmpeg thumbnail adapter.
//!
//! Extracts single frames for the filmstrip. Each request seeks to the
//! scheduled timestamp and decodes exactly one frame, scaled down to fit the
//! requested cell while preserving the source aspect ratio.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::TimeSpec;
use crate::ports::ThumbnailPort;
use crate::utils::time::format_ffmpeg_ms;

/// FFmpeg-based thumbnail adapter
pub struct FfmpegThumbnailAdapter {
    binary: String,
}

impl FfmpegThumbnailAdapter {
    /// Adapter using `ffmpeg` from the search path
    pub fn new() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
        }
    }

    /// Adapter using an explicit ffmpeg binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_args(
        input: &str,
        timestamp: TimeSpec,
        max_width: u32,
        max_height: u32,
        output: &Path,
    ) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format_ffmpeg_ms(timestamp),
            "-i".to_string(),
            input.to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-vf".to_string(),
            format!("scale={max_width}:{max_height}:force_original_aspect_ratio=decrease"),
            "-y".to_string(),
            output.display().to_string(),
        ]
    }
}

impl Default for FfmpegThumbnailAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThumbnailPort for FfmpegThumbnailAdapter {
    async fn extract_frame(
        &self,
        input: &str,
        timestamp: TimeSpec,
        max_width: u32,
        max_height: u32,
        output: &Path,
    ) -> Result<(), DomainError> {
        let args = Self::build_args(input, timestamp, max_width, max_height, output);
        debug!(command = %args.join(" "), "extracting frame");

        let result = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if result.status.success() {
            Ok(())
        } else {
            let message = String::from_utf8_lossy(&result.stderr).trim().to_string();
            Err(DomainError::ThumbnailFailed(if message.is_empty() {
                format!("ffmpeg exited with {}", result.status)
            } else {
                message
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_args_shape() {
        let out = PathBuf::from("/tmp/thumb_0.jpg");
        let args = FfmpegThumbnailAdapter::build_args(
            "/videos/in.mp4",
            TimeSpec::from_seconds(1.25),
            64,
            50,
            &out,
        );
        assert_eq!(
            args,
            vec![
                "-hide_banner",
                "-loglevel",
                "error",
                "-ss",
                "1250ms",
                "-i",
                "/videos/in.mp4",
                "-frames:v",
                "1",
                "-vf",
                "scale=64:50:force_original_aspect_ratio=decrease",
                "-y",
                "/tmp/thumb_0.jpg",
            ]
        );
    }

    #[test]
    fn test_seek_uses_whole_milliseconds() {
        let out = PathBuf::from("t.jpg");
        let args =
            FfmpegThumbnailAdapter::build_args("in.mp4", TimeSpec::from_seconds(0.0004), 32, 32, &out);
        assert_eq!(args[4], "0ms");
    }
}
