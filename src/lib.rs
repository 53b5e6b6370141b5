//! VideoTrim Core Library
//!
//! Range-selection engine for a media trimming editor: the selection state
//! machine with its clamping rules and boundary-hit feedback, the dwell-based
//! zoom heuristic, the filmstrip thumbnail scheduler, and the stream-copy trim
//! command builder with its execution session.
//!
//! # Features
//!
//! - Edge-drag selection with minimum/maximum duration enforcement
//! - Boundary-hit signalling on the clamp rising edge (haptics hook)
//! - Dwell-to-zoom around the held edge for fine adjustment
//! - Padded, generation-tagged thumbnail request planning
//! - Lossless `-c copy` trim commands with cooperative cancellation

pub mod adapters;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod selection;
pub mod session;
pub mod thumbs;
pub mod utils;

// Re-export commonly used types
pub use command::TrimCommand;
pub use config::{EditorConfig, MediaType};
pub use domain::errors::DomainError;
pub use domain::model::{AssetInfo, FrameSize, TimeRange, TimeSpec, Viewport};
pub use error::{TrimError, TrimResult};
pub use events::TrimmerEvent;
pub use selection::{DragFeedback, SelectionState, TrackGeometry, TrimmingEdge};
pub use session::{TrimOutcome, TrimSession};
pub use thumbs::{ThumbnailPlan, ThumbnailRequest, ThumbnailScheduler};
