//! Thumbnail scheduling for the trimmer track.
//!
//! Maps the visible range and viewport onto an evenly spaced set of frame
//! timestamps. A new request set is issued only when the viewport size or the
//! visible range changes by value; each set carries a generation number and
//! the latest generation wins - results arriving for a superseded set are
//! faded out and discarded rather than displayed.

use tracing::debug;

use crate::domain::model::{AssetInfo, FrameSize, TimeRange, TimeSpec, Viewport};

/// Extra slots requested around the visible range so thumbnails that scroll
/// into view during a zoom transition are already populated
const PADDING_BEFORE: i64 = 3;
const PADDING_AFTER: i64 = 6;

/// A single frame to generate, ephemeral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailRequest {
    pub timestamp: TimeSpec,
    pub slot_index: i64,
}

/// One issued request set
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailPlan {
    pub generation: u64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub requests: Vec<ThumbnailRequest>,
}

/// What to do with a generated image when its result arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailDisposition {
    /// Result belongs to the current request set
    Display,
    /// Result was superseded by a newer set; fade out, never display
    Discard,
}

/// Tracks the last issued request set and decides when to re-plan
#[derive(Debug, Clone)]
pub struct ThumbnailScheduler {
    frame_size: Option<FrameSize>,
    last_viewport: Option<Viewport>,
    last_range: Option<TimeRange>,
    generation: u64,
}

impl ThumbnailScheduler {
    /// Scheduler for a probed asset. Audio-only assets produce no plans; the
    /// host renders a static stand-in instead.
    pub fn new(asset: &AssetInfo) -> Self {
        Self {
            frame_size: if asset.has_video { asset.frame_size } else { None },
            last_viewport: None,
            last_range: None,
            generation: 0,
        }
    }

    /// Generation of the most recently issued plan
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Issue a new request set if the viewport or visible range changed.
    ///
    /// Returns `None` when nothing changed materially, the viewport is
    /// degenerate, or the asset has no video track (that path is not an
    /// error; it short-circuits silently).
    pub fn plan(&mut self, visible: &TimeRange, viewport: Viewport) -> Option<ThumbnailPlan> {
        let frame = self.frame_size?;
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        if self.last_viewport == Some(viewport) && self.last_range == Some(*visible) {
            return None;
        }

        self.last_viewport = Some(viewport);
        self.last_range = Some(*visible);
        self.generation += 1;

        // cell fills the viewport height, width preserves the frame aspect
        let cell_height = viewport.height;
        let cell_width = cell_height / frame.height * frame.width;
        let count = (viewport.width / cell_width).ceil().max(1.0) as i64;
        let step = visible.duration().seconds / count as f64;

        let mut requests = Vec::with_capacity((count + PADDING_BEFORE + PADDING_AFTER) as usize);
        for slot in -PADDING_BEFORE..count + PADDING_AFTER {
            let timestamp =
                (visible.start() + TimeSpec::from_seconds(step * slot as f64)).at_least_zero();
            requests.push(ThumbnailRequest {
                timestamp,
                slot_index: slot,
            });
        }

        debug!(
            generation = self.generation,
            count = requests.len(),
            visible = %visible,
            "issued thumbnail request set"
        );

        Some(ThumbnailPlan {
            generation: self.generation,
            cell_width,
            cell_height,
            requests,
        })
    }

    /// Decide whether a completed request's image may be displayed.
    /// Last-issued-wins: only the current generation is displayed.
    pub fn disposition(&self, generation: u64) -> ThumbnailDisposition {
        if generation == self.generation {
            ThumbnailDisposition::Display
        } else {
            ThumbnailDisposition::Discard
        }
    }

    /// Force the next `plan` call to issue a fresh set, e.g. after the asset
    /// or composition changes
    pub fn invalidate(&mut self) {
        self.last_viewport = None;
        self.last_range = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AssetInfo;

    fn video_asset() -> AssetInfo {
        AssetInfo::new(
            TimeSpec::from_seconds(30.0),
            true,
            true,
            Some(FrameSize {
                width: 100.0,
                height: 100.0,
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_request_count_matches_viewport() {
        // viewport 300x50, square frames: cell width 50, ceil(300/50) + 9 = 15
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        let plan = scheduler
            .plan(&TimeRange::from_seconds(0.0, 30.0), Viewport::new(300.0, 50.0))
            .unwrap();

        assert_eq!(plan.requests.len(), 15);
        assert_eq!(plan.cell_width, 50.0);
        assert!(plan.requests.iter().all(|r| r.timestamp >= TimeSpec::ZERO));
    }

    #[test]
    fn test_padding_timestamps_clamped_to_zero() {
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        let plan = scheduler
            .plan(&TimeRange::from_seconds(0.0, 30.0), Viewport::new(300.0, 50.0))
            .unwrap();

        // the three slots before the window all land on zero
        assert_eq!(plan.requests[0].slot_index, -3);
        assert_eq!(plan.requests[0].timestamp, TimeSpec::ZERO);
        assert_eq!(plan.requests[2].timestamp, TimeSpec::ZERO);
        assert_eq!(plan.requests[3].timestamp, TimeSpec::ZERO);
        // a slot inside the window is evenly spaced: 30s / 6 cells = 5s per slot
        assert_eq!(plan.requests[4].timestamp, TimeSpec::from_seconds(5.0));
    }

    #[test]
    fn test_replans_only_on_material_change() {
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        let range = TimeRange::from_seconds(0.0, 30.0);
        let viewport = Viewport::new(300.0, 50.0);

        assert!(scheduler.plan(&range, viewport).is_some());
        assert!(scheduler.plan(&range, viewport).is_none());

        // range changed by value: new set
        let zoomed = TimeRange::from_seconds(10.0, 12.0);
        assert!(scheduler.plan(&zoomed, viewport).is_some());
        // viewport changed: new set
        assert!(scheduler.plan(&zoomed, Viewport::new(320.0, 50.0)).is_some());
    }

    #[test]
    fn test_last_issued_generation_wins() {
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        let viewport = Viewport::new(300.0, 50.0);

        let first = scheduler
            .plan(&TimeRange::from_seconds(0.0, 30.0), viewport)
            .unwrap();
        let second = scheduler
            .plan(&TimeRange::from_seconds(5.0, 7.0), viewport)
            .unwrap();

        assert_eq!(
            scheduler.disposition(first.generation),
            ThumbnailDisposition::Discard
        );
        assert_eq!(
            scheduler.disposition(second.generation),
            ThumbnailDisposition::Display
        );
    }

    #[test]
    fn test_audio_asset_short_circuits() {
        let audio = AssetInfo::new(TimeSpec::from_seconds(30.0), false, true, None).unwrap();
        let mut scheduler = ThumbnailScheduler::new(&audio);
        assert!(scheduler
            .plan(&TimeRange::from_seconds(0.0, 30.0), Viewport::new(300.0, 50.0))
            .is_none());
    }

    #[test]
    fn test_degenerate_viewport_is_skipped() {
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        assert!(scheduler
            .plan(&TimeRange::from_seconds(0.0, 30.0), Viewport::new(0.0, 50.0))
            .is_none());
    }

    #[test]
    fn test_invalidate_forces_replan() {
        let mut scheduler = ThumbnailScheduler::new(&video_asset());
        let range = TimeRange::from_seconds(0.0, 30.0);
        let viewport = Viewport::new(300.0, 50.0);

        scheduler.plan(&range, viewport).unwrap();
        assert!(scheduler.plan(&range, viewport).is_none());
        scheduler.invalidate();
        assert!(scheduler.plan(&range, viewport).is_some());
    }
}
