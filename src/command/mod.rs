//! Trim command construction for the external transcode tool.
//!
//! The selected range is cut by shelling out to ffmpeg with stream-copy
//! semantics; this module turns a finalized selection plus options into the
//! ordered argument list that invocation expects. No validation happens here
//! beyond range well-formedness - the selection state machine already
//! enforced the duration and bound constraints upstream.

use tracing::debug;

use crate::domain::model::{TimeRange, TimeSpec};
use crate::utils::time::{format_ffmpeg_ms, unix_timestamp, utc_creation_timestamp};

/// Prefix for auto-generated output file names
pub const FILE_PREFIX: &str = "trimmedVideo";

/// Immutable description of one confirmed trim, consumed by the execute port
#[derive(Debug, Clone, PartialEq)]
pub struct TrimCommand {
    pub input_path: String,
    pub output_path: String,
    pub start: TimeSpec,
    pub end: TimeSpec,
    /// Display rotation in degrees; emitted only when rotation is enabled
    pub rotation_degrees: Option<i64>,
    /// UTC timestamp stamped into the output's creation-time metadata
    pub metadata_timestamp: String,
}

impl TrimCommand {
    /// Build a command for a selected range in absolute asset time.
    /// The metadata timestamp defaults to the current UTC time.
    pub fn new(
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        selected: TimeRange,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            start: selected.start(),
            end: selected.end(),
            rotation_degrees: None,
            metadata_timestamp: utc_creation_timestamp(),
        }
    }

    /// Emit a display-rotation argument
    pub fn with_rotation(mut self, degrees: i64) -> Self {
        self.rotation_degrees = Some(degrees);
        self
    }

    /// Override the creation-time metadata value
    pub fn with_metadata_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.metadata_timestamp = timestamp.into();
        self
    }

    /// Duration of the requested cut; progress denominator for the invocation
    pub fn selected_duration(&self) -> TimeSpec {
        self.end - self.start
    }

    /// Ordered argument list: seek-from, seek-to, optional rotation, input,
    /// stream-copy codec flag, creation-time metadata, output. Times are
    /// whole milliseconds.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-ss".to_string(),
            format_ffmpeg_ms(self.start),
            "-to".to_string(),
            format_ffmpeg_ms(self.end),
        ];

        if let Some(degrees) = self.rotation_degrees {
            args.push("-display_rotation".to_string());
            args.push(degrees.to_string());
        }

        args.push("-i".to_string());
        args.push(self.input_path.clone());
        args.push("-c".to_string());
        args.push("copy".to_string());
        args.push("-metadata".to_string());
        args.push(format!("creation_time={}", self.metadata_timestamp));
        args.push(self.output_path.clone());

        debug!(command = %args.join(" "), "built trim command");
        args
    }
}

/// Auto-generated output file name: `{prefix}_{unix_timestamp}.{ext}`
pub fn output_file_name(ext: &str) -> String {
    format!("{}_{}.{}", FILE_PREFIX, unix_timestamp(), ext)
}
