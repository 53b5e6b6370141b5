//! Range-selection state machine.
//!
//! A pure reducer over [`SelectionState`]: the host gesture layer converts
//! pointer positions to timeline times (see [`geometry::TrackGeometry`]) and
//! feeds them in through the `begin_*` / `update_*` / `end_drag` methods. Each
//! update resolves the proposal against the duration constraints and the full
//! asset range, mutates only the owned state, and returns a [`DragFeedback`]
//! describing the discrete signals the host should surface (haptics).
//!
//! The host guarantees at most one active drag at a time; the three gesture
//! streams are mutually exclusive at the recognizer level.

use tracing::debug;

use crate::domain::model::{TimeRange, TimeSpec};

pub mod geometry;
pub mod zoom;

pub use geometry::TrackGeometry;

/// Which handle, if any, is actively being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimmingEdge {
    None,
    Leading,
    Trailing,
}

/// Discrete signals produced by a single drag update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragFeedback {
    /// True when this update started clamping the pointer-derived proposal
    /// (edge-triggered; drives haptic feedback in the host)
    pub boundary_hit: bool,
}

/// Interactive selection over a loaded asset.
///
/// Created once the asset duration is known; `selected_range` starts as the
/// full span. Destroyed with the hosting UI; nothing is persisted.
#[derive(Debug, Clone)]
pub struct SelectionState {
    full_range: TimeRange,
    selected_range: TimeRange,
    progress: TimeSpec,
    trimming_edge: TrimmingEdge,
    is_scrubbing: bool,
    minimum_duration: TimeSpec,
    maximum_duration: TimeSpec,
    did_clamp_while_panning: bool,
    pub(crate) zoom: zoom::ZoomState,
}

impl SelectionState {
    /// New selection spanning the whole asset, with the default constraints
    /// (1 second minimum, unbounded maximum)
    pub fn new(full_range: TimeRange) -> Self {
        Self {
            full_range,
            selected_range: full_range,
            progress: full_range.start(),
            trimming_edge: TrimmingEdge::None,
            is_scrubbing: false,
            minimum_duration: TimeSpec::from_seconds(1.0),
            maximum_duration: TimeSpec::UNBOUNDED,
            did_clamp_while_panning: false,
            zoom: zoom::ZoomState::default(),
        }
    }

    /// New selection with explicit duration constraints; `maximum` of `None`
    /// means unbounded. The initial selection is capped at the maximum so a
    /// trim confirmed without any drag already satisfies the constraints.
    pub fn with_limits(full_range: TimeRange, minimum: TimeSpec, maximum: Option<TimeSpec>) -> Self {
        let mut state = Self::new(full_range);
        state.minimum_duration = minimum;
        state.maximum_duration = maximum.unwrap_or(TimeSpec::UNBOUNDED);
        if state.selected_range.duration() > state.maximum_duration {
            let end = full_range.clamp(full_range.start() + state.maximum_duration);
            state.selected_range = TimeRange::new(full_range.start(), end);
        }
        state
    }

    pub fn full_range(&self) -> TimeRange {
        self.full_range
    }

    pub fn selected_range(&self) -> TimeRange {
        self.selected_range
    }

    pub fn progress(&self) -> TimeSpec {
        self.progress
    }

    pub fn trimming_edge(&self) -> TrimmingEdge {
        self.trimming_edge
    }

    pub fn is_scrubbing(&self) -> bool {
        self.is_scrubbing
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.zoom.zoomed_range().is_some()
    }

    pub fn zoomed_range(&self) -> Option<TimeRange> {
        self.zoom.zoomed_range()
    }

    pub fn minimum_duration(&self) -> TimeSpec {
        self.minimum_duration
    }

    pub fn maximum_duration(&self) -> TimeSpec {
        self.maximum_duration
    }

    /// The window currently rendered: the zoomed window while zoomed in,
    /// otherwise the full asset range
    pub fn visible_range(&self) -> TimeRange {
        self.zoom.zoomed_range().unwrap_or(self.full_range)
    }

    /// The boundary being dragged, while a trim drag is active
    pub fn selected_time(&self) -> Option<TimeSpec> {
        match self.trimming_edge {
            TrimmingEdge::None => None,
            TrimmingEdge::Leading => Some(self.selected_range.start()),
            TrimmingEdge::Trailing => Some(self.selected_range.end()),
        }
    }

    /// Move the playback cursor, kept inside the selected range
    pub fn set_progress(&mut self, time: TimeSpec) {
        self.progress = self.selected_range.clamp(time);
    }

    // --- leading-handle drag ---

    pub fn begin_leading_drag(&mut self) {
        debug!(edge = "leading", "begin trim drag");
        self.trimming_edge = TrimmingEdge::Leading;
        self.did_clamp_while_panning = false;
    }

    /// Resolve a leading-handle proposal.
    ///
    /// Clamps are applied in a fixed order: minimum duration, maximum
    /// duration, full-range start, then minimum duration once more (the
    /// earlier pins can push the duration back below the minimum). The same
    /// order is used for the trailing handle, mirrored.
    pub fn update_leading_drag(&mut self, candidate: TimeSpec) -> DragFeedback {
        let end = self.selected_range.end();
        let min_start = end - self.minimum_duration;

        let mut start = candidate;
        let mut clamped = false;

        if start > min_start {
            start = min_start;
            clamped = true;
        }
        if (end - start) > self.maximum_duration {
            start = end - self.maximum_duration;
            clamped = true;
        }
        if start < self.full_range.start() {
            start = self.full_range.start();
            clamped = true;
        }
        if (end - start) < self.minimum_duration {
            start = min_start;
            clamped = true;
        }

        self.selected_range = TimeRange::new(start, end);
        self.edge_feedback(clamped)
    }

    // --- trailing-handle drag ---

    pub fn begin_trailing_drag(&mut self) {
        debug!(edge = "trailing", "begin trim drag");
        self.trimming_edge = TrimmingEdge::Trailing;
        self.did_clamp_while_panning = false;
    }

    /// Resolve a trailing-handle proposal; mirror image of
    /// [`update_leading_drag`](Self::update_leading_drag), clamped against
    /// `full_range.end()`.
    pub fn update_trailing_drag(&mut self, candidate: TimeSpec) -> DragFeedback {
        let start = self.selected_range.start();
        let max_end = start + self.minimum_duration;

        let mut end = candidate;
        let mut clamped = false;

        if end < max_end {
            end = max_end;
            clamped = true;
        }
        if (end - start) > self.maximum_duration {
            end = start + self.maximum_duration;
            clamped = true;
        }
        if end > self.full_range.end() {
            end = self.full_range.end();
            clamped = true;
        }
        if (end - start) < self.minimum_duration {
            end = max_end;
            clamped = true;
        }

        self.selected_range = TimeRange::new(start, end);
        self.edge_feedback(clamped)
    }

    // --- progress scrub ---

    pub fn begin_scrub(&mut self) {
        debug!("begin scrub");
        self.is_scrubbing = true;
        self.did_clamp_while_panning = false;
    }

    /// Resolve a scrub proposal into `[selected.start, selected.end]`
    pub fn update_scrub(&mut self, candidate: TimeSpec) -> DragFeedback {
        let clamped_time = self.selected_range.clamp(candidate);
        let clamped = clamped_time != candidate;
        self.progress = clamped_time;
        self.edge_feedback(clamped)
    }

    /// End whichever drag is active.
    ///
    /// Trim drags snap the progress cursor to the edge that was dragged and
    /// unconditionally end any zoom; the state returns to idle.
    pub fn end_drag(&mut self) {
        match self.trimming_edge {
            TrimmingEdge::Leading => self.progress = self.selected_range.start(),
            TrimmingEdge::Trailing => self.progress = self.selected_range.end(),
            TrimmingEdge::None => {}
        }
        debug!(selected = %self.selected_range, "end drag");
        self.trimming_edge = TrimmingEdge::None;
        self.is_scrubbing = false;
        self.did_clamp_while_panning = false;
        self.zoom.end_session();
    }

    /// Boundary hits fire on the not-clamped to clamped transition only
    fn edge_feedback(&mut self, clamped: bool) -> DragFeedback {
        let boundary_hit = clamped && !self.did_clamp_while_panning;
        self.did_clamp_while_panning = clamped;
        DragFeedback { boundary_hit }
    }
}
