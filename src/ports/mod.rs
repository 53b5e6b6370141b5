// Ports - Interface definitions (contracts)

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::command::TrimCommand;
use crate::domain::errors::DomainError;
use crate::domain::model::{AssetInfo, TimeSpec};
use crate::session::{TrimOutcome, TrimProgress};

/// Port for asset loading and inspection.
///
/// Called once per asset, before the trimmer becomes interactive; a probe
/// failure is terminal and the selection state machine is never created.
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its description
    async fn probe_asset(&self, path: &str) -> Result<AssetInfo, DomainError>;
}

/// Port for the external trim invocation.
///
/// The invocation is asynchronous, long-running and cooperatively
/// cancellable through the progress callback; it terminates only when the
/// external tool reports a terminal state.
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run a built trim command to its terminal outcome, reporting
    /// time-based progress along the way
    async fn execute_trim(
        &self,
        command: &TrimCommand,
        progress: Arc<dyn TrimProgress>,
    ) -> Result<TrimOutcome, DomainError>;
}

/// Port for thumbnail frame extraction.
///
/// One call per scheduled request; decoding may happen on a background
/// worker, and the caller discards results superseded by a newer request set.
#[async_trait]
pub trait ThumbnailPort: Send + Sync {
    /// Extract a single frame at `timestamp` into `output`, scaled to fit
    /// within `max_width` x `max_height`
    async fn extract_frame(
        &self,
        input: &str,
        timestamp: TimeSpec,
        max_width: u32,
        max_height: u32,
        output: &Path,
    ) -> Result<(), DomainError>;
}
