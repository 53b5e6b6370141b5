//! FFprobe adapter for asset probing.
//!
//! Shells out to `ffprobe` and reads its JSON description of the container:
//! the asset duration, which track kinds are present, the video frame size
//! with the display transform applied, and any display rotation.

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{AssetInfo, FrameSize, TimeSpec};
use crate::ports::ProbePort;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: String,
}

impl FfprobeAdapter {
    /// Adapter using `ffprobe` from the search path
    pub fn new() -> Self {
        Self {
            binary: "ffprobe".to_string(),
        }
    }

    /// Adapter using an explicit ffprobe binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn parse_output(raw: &[u8]) -> Result<AssetInfo, DomainError> {
        let doc: Value = serde_json::from_slice(raw)
            .map_err(|e| DomainError::ProbeFailed(format!("unparseable ffprobe output: {}", e)))?;

        let duration = doc["format"]["duration"]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| {
                DomainError::ProbeFailed("container reports no duration".to_string())
            })?;

        let streams = doc["streams"].as_array().cloned().unwrap_or_default();
        let mut has_video = false;
        let mut has_audio = false;
        let mut frame_size = None;
        let mut rotation = None;

        for stream in &streams {
            match stream["codec_type"].as_str() {
                Some("video") if !has_video => {
                    has_video = true;
                    let width = stream["width"].as_f64().unwrap_or(0.0);
                    let height = stream["height"].as_f64().unwrap_or(0.0);
                    rotation = Self::stream_rotation(stream);
                    if width > 0.0 && height > 0.0 {
                        // sideways display rotation swaps the rendered axes
                        let quarter_turn = rotation
                            .map(|deg| (deg.rem_euclid(180.0) - 90.0).abs() < 1.0)
                            .unwrap_or(false);
                        frame_size = Some(if quarter_turn {
                            FrameSize {
                                width: height,
                                height: width,
                            }
                        } else {
                            FrameSize { width, height }
                        });
                    }
                }
                Some("audio") => has_audio = true,
                _ => {}
            }
        }

        let mut info = AssetInfo::new(
            TimeSpec::from_seconds(duration),
            has_video,
            has_audio,
            frame_size,
        )?;
        info.rotation = rotation;
        Ok(info)
    }

    fn stream_rotation(stream: &Value) -> Option<f64> {
        let side_data = stream["side_data_list"].as_array()?;
        side_data.iter().find_map(|entry| {
            entry["rotation"]
                .as_f64()
                .or_else(|| entry["rotation"].as_str().and_then(|s| s.parse().ok()))
        })
    }
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_asset(&self, path: &str) -> Result<AssetInfo, DomainError> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                path,
            ])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::ProbeFailed(stderr.trim().to_string()));
        }

        let info = Self::parse_output(&output.stdout)?;
        debug!(
            path,
            duration_ms = info.duration.as_millis(),
            has_video = info.has_video,
            "asset probed"
        );
        Ok(info)
    }
}
