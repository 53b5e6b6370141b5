//! Pixel/time mapping for the trimmer track.
//!
//! The host converts pointer locations to timeline times through this mapping
//! before feeding them to the selection state machine, and back again when
//! positioning handles and thumbnails. The mapping is relative to the visible
//! range, so it stays valid while zoomed in.

use crate::domain::model::{TimeRange, TimeSpec};

/// Horizontal geometry of the rendered track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    width: f64,
    inset: f64,
}

impl TrackGeometry {
    /// `width` is the full control width, `inset` the combined grabber chevron
    /// width and horizontal inset on each side
    pub fn new(width: f64, inset: f64) -> Self {
        Self { width, inset }
    }

    pub fn inset(&self) -> f64 {
        self.inset
    }

    /// Width of the track between the two insets
    pub fn available_width(&self) -> f64 {
        (self.width - self.inset * 2.0).max(0.0)
    }

    /// Timeline time for a pointer x position over the given visible range.
    ///
    /// Positions left of the track map to times before `visible.start`; the
    /// state machine clamps, not the geometry.
    pub fn time_at(&self, visible: &TimeRange, x: f64) -> TimeSpec {
        let available = self.available_width();
        let duration = visible.duration().seconds;
        if available <= 0.0 || duration <= 0.0 {
            return visible.start();
        }
        let offset = x - self.inset;
        visible.start() + TimeSpec::from_seconds(offset / available * duration)
    }

    /// Pointer x position for a timeline time over the given visible range
    pub fn position_of(&self, visible: &TimeRange, time: TimeSpec) -> f64 {
        let duration = visible.duration().seconds;
        if duration <= 0.0 {
            return self.inset;
        }
        let ratio = self.available_width() / duration;
        (time - visible.start()).seconds * ratio + self.inset
    }
}
