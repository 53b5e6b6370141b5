// Domain models - Core types and data structures

use std::fmt;
use std::ops::{Add, Sub};

use crate::domain::errors::DomainError;

/// Time specification with precision - represents time in seconds with fractional precision.
///
/// Values may be negative: a drag proposal derived from a pointer position left of the
/// track maps to a negative timeline time before clamping.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    pub const ZERO: TimeSpec = TimeSpec { seconds: 0.0 };

    /// Unbounded duration, used as the default maximum trim duration
    pub const UNBOUNDED: TimeSpec = TimeSpec {
        seconds: f64::INFINITY,
    };

    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from whole milliseconds
    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis as f64 / 1000.0,
        }
    }

    /// Round to whole milliseconds
    pub fn as_millis(&self) -> i64 {
        (self.seconds * 1000.0).round() as i64
    }

    /// Clamp into the closed interval `[min, max]`
    pub fn clamped(&self, min: TimeSpec, max: TimeSpec) -> Self {
        Self {
            seconds: self.seconds.clamp(min.seconds, max.seconds),
        }
    }

    /// Never earlier than zero
    pub fn at_least_zero(&self) -> Self {
        Self {
            seconds: self.seconds.max(0.0),
        }
    }

    /// Format as HH:MM:SS.ms
    pub fn format_hms(&self) -> String {
        let total = self.seconds.max(0.0);
        let hours = (total / 3600.0) as u32;
        let minutes = ((total % 3600.0) / 60.0) as u32;
        let seconds = (total % 60.0) as u32;
        let milliseconds = ((total % 1.0) * 1000.0).round() as u32;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl Add for TimeSpec {
    type Output = TimeSpec;

    fn add(self, rhs: TimeSpec) -> TimeSpec {
        TimeSpec::from_seconds(self.seconds + rhs.seconds)
    }
}

impl Sub for TimeSpec {
    type Output = TimeSpec;

    fn sub(self, rhs: TimeSpec) -> TimeSpec {
        TimeSpec::from_seconds(self.seconds - rhs.seconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Immutable interval over a media timeline, invariant `start <= end`.
///
/// The invariant is enforced at construction: a reversed pair is swapped, so a
/// malformed range is unrepresentable. Every mutation produces a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: TimeSpec,
    end: TimeSpec,
}

impl TimeRange {
    /// Create a range from two boundaries; reversed boundaries are swapped
    pub fn new(a: TimeSpec, b: TimeSpec) -> Self {
        if a.seconds <= b.seconds {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Create a range from boundary seconds
    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end))
    }

    pub fn start(&self) -> TimeSpec {
        self.start
    }

    pub fn end(&self) -> TimeSpec {
        self.end
    }

    pub fn duration(&self) -> TimeSpec {
        self.end - self.start
    }

    /// Closed-interval containment test
    pub fn contains(&self, t: TimeSpec) -> bool {
        self.start.seconds <= t.seconds && t.seconds <= self.end.seconds
    }

    /// Clamp a time to the nearest boundary of this range
    pub fn clamp(&self, t: TimeSpec) -> TimeSpec {
        t.clamped(self.start, self.end)
    }

    /// New range with a replaced start; re-normalized if the pair reverses
    pub fn with_start(&self, start: TimeSpec) -> Self {
        Self::new(start, self.end)
    }

    /// New range with a replaced end; re-normalized if the pair reverses
    pub fn with_end(&self, end: TimeSpec) -> Self {
        Self::new(self.start, end)
    }

    /// Overlap of two ranges, if any
    pub fn intersection(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.seconds.max(other.start.seconds);
        let end = self.end.seconds.min(other.end.seconds);
        if start <= end {
            Some(TimeRange::from_seconds(start, end))
        } else {
            None
        }
    }

    /// Range shifted by a signed offset
    pub fn shifted_by(&self, offset: TimeSpec) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}

/// Natural frame size of the primary video track, display transform applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Probed description of a loaded media asset.
///
/// Delivered once by the probe collaborator before the trimmer becomes
/// interactive; the selection core only reads the duration from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInfo {
    pub duration: TimeSpec,
    pub has_video: bool,
    pub has_audio: bool,
    /// Present only for assets with a video track
    pub frame_size: Option<FrameSize>,
    /// Display rotation in degrees, when the container carries one
    pub rotation: Option<f64>,
}

impl AssetInfo {
    /// Create asset info with validation
    pub fn new(
        duration: TimeSpec,
        has_video: bool,
        has_audio: bool,
        frame_size: Option<FrameSize>,
    ) -> Result<Self, DomainError> {
        if duration.seconds <= 0.0 || !duration.seconds.is_finite() {
            return Err(DomainError::ProbeFailed(
                "Could not determine media duration".to_string(),
            ));
        }
        if !has_video && !has_audio {
            return Err(DomainError::ProbeFailed(
                "Asset has neither video nor audio tracks".to_string(),
            ));
        }
        if let Some(size) = &frame_size {
            if size.width <= 0.0 || size.height <= 0.0 {
                return Err(DomainError::ProbeFailed(
                    "Video frame dimensions cannot be zero".to_string(),
                ));
            }
        }

        Ok(Self {
            duration,
            has_video,
            has_audio,
            frame_size,
            rotation: None,
        })
    }

    /// The asset's full timeline span
    pub fn full_range(&self) -> TimeRange {
        TimeRange::new(TimeSpec::ZERO, self.duration)
    }
}

/// Rendering viewport of the trimmer track, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
