//! Zoom heuristic for sub-pixel trim precision.
//!
//! While a handle drag is active and the pointer has been still for the dwell
//! interval, the visible window narrows around the active edge, keeping the
//! edge at the same relative pixel offset so the handle does not jump. Zoom
//! engages at most once per drag session and always ends with the drag.
//!
//! Time is passed in explicitly as `Instant`s so the dwell logic stays
//! deterministic under test; the host drives it from its own frame clock.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::model::{TimeRange, TimeSpec};
use crate::selection::{SelectionState, TrackGeometry, TrimmingEdge};

/// Pointer dwell before the zoom engages
pub const ZOOM_DWELL: Duration = Duration::from_millis(500);

/// Zoomed window duration cap, for assets longer than [`WIDE_ASSET_THRESHOLD`]
const ZOOMED_DURATION_CAP: f64 = 2.0;

/// Assets at or below this duration zoom to half their span instead of the cap
const WIDE_ASSET_THRESHOLD: f64 = 4.0;

/// Dwell timer and zoom window, owned by the selection state
#[derive(Debug, Clone, Default)]
pub(crate) struct ZoomState {
    deadline: Option<Instant>,
    zoomed_range: Option<TimeRange>,
    engaged_this_session: bool,
}

impl ZoomState {
    pub(crate) fn zoomed_range(&self) -> Option<TimeRange> {
        self.zoomed_range
    }

    /// Drag ended: drop the timer and revert to the full range
    pub(crate) fn end_session(&mut self) {
        self.deadline = None;
        self.zoomed_range = None;
        self.engaged_this_session = false;
    }
}

impl SelectionState {
    /// Arm (or re-arm) the dwell timer after a pointer move during a handle
    /// drag. Arming replaces any outstanding deadline; while already zoomed
    /// this is a no-op, so zoom engages at most once per drag session.
    pub fn arm_zoom_timer(&mut self, now: Instant) {
        if self.zoom.zoomed_range.is_some() || self.zoom.engaged_this_session {
            return;
        }
        self.zoom.deadline = Some(now + ZOOM_DWELL);
    }

    /// Cancel the dwell timer without ending the drag
    pub fn cancel_zoom_timer(&mut self) {
        self.zoom.deadline = None;
    }

    /// Check the dwell timer against the current time and zoom in when it has
    /// expired. Returns true when the zoom engaged on this call, so the host
    /// can animate the transition and play selection feedback.
    pub fn poll_zoom(&mut self, now: Instant, geometry: &TrackGeometry) -> bool {
        let Some(deadline) = self.zoom.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.zoom.deadline = None;
        self.zoom_in(geometry)
    }

    /// Narrow the visible window around the active edge.
    ///
    /// The new window duration is half the asset, capped at 2 seconds for
    /// assets longer than 4 seconds. The active edge keeps the relative pixel
    /// offset it currently occupies, so the window may extend past the asset
    /// bounds; only rendering is affected.
    fn zoom_in(&mut self, geometry: &TrackGeometry) -> bool {
        if self.zoom.zoomed_range.is_some() {
            return false;
        }

        let edge = match self.trimming_edge() {
            TrimmingEdge::Leading => self.selected_range().start(),
            TrimmingEdge::Trailing => self.selected_range().end(),
            TrimmingEdge::None => return false,
        };

        let full = self.full_range().duration().seconds;
        let new_duration = if full > WIDE_ASSET_THRESHOLD {
            ZOOMED_DURATION_CAP.min(full * 0.5)
        } else {
            full * 0.5
        };

        let available = geometry.available_width();
        if available <= 0.0 || new_duration <= 0.0 {
            return false;
        }

        let visible = self.visible_range();
        let position = (geometry.position_of(&visible, edge) - geometry.inset())
            .clamp(0.0, available);
        let lead = position / available * new_duration;
        let start = edge.seconds - lead;

        let zoomed = TimeRange::from_seconds(start, start + new_duration);
        debug!(window = %zoomed, "zoom engaged");
        self.zoom.zoomed_range = Some(zoomed);
        self.zoom.engaged_this_session = true;
        true
    }
}
