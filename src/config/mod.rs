//! Trimmer configuration.
//!
//! Defaults match the widget's documented behavior: mp4 output, 1 second
//! minimum selection, unbounded maximum, haptics on, rotation off. A config
//! can be deserialized from a TOML file shipped by the embedding app.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::model::TimeSpec;
use crate::error::{TrimError, TrimResult};

/// Kind of media being edited; audio assets skip thumbnail generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
}

/// Editor configuration supplied by the embedding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Output container extension
    pub output_ext: String,
    pub media_type: MediaType,
    /// Minimum selectable duration in milliseconds
    pub min_duration_ms: i64,
    /// Maximum selectable duration in milliseconds; non-positive means unbounded
    pub max_duration_ms: i64,
    pub enable_haptic_feedback: bool,
    pub enable_rotation: bool,
    /// Display rotation in degrees, applied only when rotation is enabled
    pub rotation_angle: i64,
    /// Offer a cancel button while the trim runs
    pub enable_cancel_trimming: bool,
    /// Confirm cancellation with a dialog before forwarding it
    pub enable_cancel_trimming_dialog: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output_ext: "mp4".to_string(),
            media_type: MediaType::Video,
            min_duration_ms: 1000,
            max_duration_ms: -1,
            enable_haptic_feedback: true,
            enable_rotation: false,
            rotation_angle: 0,
            enable_cancel_trimming: true,
            enable_cancel_trimming_dialog: true,
        }
    }
}

impl EditorConfig {
    /// Minimum selection duration as a time quantity
    pub fn minimum_duration(&self) -> TimeSpec {
        TimeSpec::from_millis(self.min_duration_ms.max(0))
    }

    /// Maximum selection duration, `None` when unbounded
    pub fn maximum_duration(&self) -> Option<TimeSpec> {
        if self.max_duration_ms > 0 {
            Some(TimeSpec::from_millis(self.max_duration_ms))
        } else {
            None
        }
    }

    /// Rotation to emit in the trim command, when enabled
    pub fn rotation(&self) -> Option<i64> {
        if self.enable_rotation {
            Some(self.rotation_angle)
        } else {
            None
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> TrimResult<Self> {
        toml::from_str(content).map_err(|e| TrimError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> TrimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
