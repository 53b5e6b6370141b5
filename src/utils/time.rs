//! Time formatting utilities for the external tool boundary

use chrono::Utc;

use crate::domain::model::TimeSpec;

/// ffmpeg time argument in whole milliseconds, e.g. `1000ms`
pub fn format_ffmpeg_ms(time: TimeSpec) -> String {
    format!("{}ms", time.as_millis())
}

/// UTC timestamp for output creation-time metadata,
/// `yyyy-MM-ddTHH:mm:ss.SSSSSS+0000`
pub fn utc_creation_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f%z").to_string()
}

/// Whole seconds since the epoch, used in auto-generated output names
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}
