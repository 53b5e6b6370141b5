//! Trim invocation session.
//!
//! The external tool owns the actual transcode; this module observes it. A
//! session moves `Idle -> Running -> {Complete, Cancelled, Failed}` and relays
//! the terminal outcome upward unchanged. Progress is time-based: the tool
//! reports processed media time, and the fraction is that elapsed time over
//! the requested selection duration.

use tracing::{debug, warn};

use crate::command::TrimCommand;
use crate::domain::errors::DomainError;
use crate::domain::model::TimeSpec;

pub mod progress;

pub use progress::{CancelFlag, NullProgress, TrimProgress};

/// Terminal result of a trim invocation
#[derive(Debug, Clone, PartialEq)]
pub enum TrimOutcome {
    /// The cut was written; carries the originally-requested bounds
    Success {
        output_path: String,
        start: TimeSpec,
        end: TimeSpec,
        duration: TimeSpec,
    },
    /// User-initiated cooperative cancel; not an error
    Cancelled,
    /// The external tool's diagnostic text, verbatim
    Failed { message: String },
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Complete,
    Cancelled,
    Failed,
}

/// Observed state of one trim invocation
#[derive(Debug, Clone)]
pub struct TrimSession {
    phase: SessionPhase,
    total: TimeSpec,
    fraction: f64,
    outcome: Option<TrimOutcome>,
}

impl TrimSession {
    /// Session for a built command; starts idle
    pub fn new(command: &TrimCommand) -> Self {
        Self {
            phase: SessionPhase::Idle,
            total: command.selected_duration(),
            fraction: 0.0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Latest progress fraction, 0..=1
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Terminal outcome, once finished
    pub fn outcome(&self) -> Option<&TrimOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Complete | SessionPhase::Cancelled | SessionPhase::Failed
        )
    }

    /// `Idle -> Running`; any other phase is a state error
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.phase != SessionPhase::Idle {
            return Err(DomainError::BadState(format!(
                "cannot start trim session from {:?}",
                self.phase
            )));
        }
        debug!(total_ms = self.total.as_millis(), "trim session started");
        self.phase = SessionPhase::Running;
        Ok(())
    }

    /// Record processed media time from the external tool; returns the
    /// clamped fraction. Ignored outside `Running` (progress callbacks can
    /// race the completion callback; completion wins).
    pub fn record_elapsed(&mut self, elapsed: TimeSpec) -> f64 {
        if self.phase != SessionPhase::Running {
            return self.fraction;
        }
        let total = self.total.seconds;
        let fraction = if total > 0.0 {
            (elapsed.seconds / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.fraction = fraction;
        fraction
    }

    /// Apply the terminal outcome; `Running -> {Complete, Cancelled, Failed}`
    pub fn finish(&mut self, outcome: TrimOutcome) -> Result<(), DomainError> {
        if self.phase != SessionPhase::Running {
            return Err(DomainError::BadState(format!(
                "cannot finish trim session from {:?}",
                self.phase
            )));
        }
        self.phase = match &outcome {
            TrimOutcome::Success { .. } => {
                self.fraction = 1.0;
                SessionPhase::Complete
            }
            TrimOutcome::Cancelled => SessionPhase::Cancelled,
            TrimOutcome::Failed { message } => {
                warn!(message = %message, "trim invocation failed");
                SessionPhase::Failed
            }
        };
        self.outcome = Some(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeRange;

    fn session() -> TrimSession {
        let command = TrimCommand::new("in.mp4", "out.mp4", TimeRange::from_seconds(1.0, 5.0));
        TrimSession::new(&command)
    }

    #[test]
    fn test_lifecycle_success() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        s.start().unwrap();
        assert_eq!(s.phase(), SessionPhase::Running);

        // 2s of a 4s cut
        let fraction = s.record_elapsed(TimeSpec::from_seconds(2.0));
        assert!((fraction - 0.5).abs() < 1e-9);

        s.finish(TrimOutcome::Success {
            output_path: "out.mp4".to_string(),
            start: TimeSpec::from_seconds(1.0),
            end: TimeSpec::from_seconds(5.0),
            duration: TimeSpec::from_seconds(4.0),
        })
        .unwrap();
        assert_eq!(s.phase(), SessionPhase::Complete);
        assert_eq!(s.fraction(), 1.0);
        assert!(s.is_finished());
    }

    #[test]
    fn test_progress_fraction_is_clamped() {
        let mut s = session();
        s.start().unwrap();
        assert_eq!(s.record_elapsed(TimeSpec::from_seconds(-1.0)), 0.0);
        assert_eq!(s.record_elapsed(TimeSpec::from_seconds(10.0)), 1.0);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut s = session();
        s.start().unwrap();
        assert!(s.start().is_err());
    }

    #[test]
    fn test_finish_requires_running() {
        let mut s = session();
        assert!(s.finish(TrimOutcome::Cancelled).is_err());
    }

    #[test]
    fn test_late_progress_after_terminal_is_ignored() {
        let mut s = session();
        s.start().unwrap();
        s.finish(TrimOutcome::Cancelled).unwrap();
        assert_eq!(s.phase(), SessionPhase::Cancelled);

        let before = s.fraction();
        s.record_elapsed(TimeSpec::from_seconds(3.0));
        assert_eq!(s.fraction(), before);
    }

    #[test]
    fn test_failure_keeps_message_verbatim() {
        let mut s = session();
        s.start().unwrap();
        s.finish(TrimOutcome::Failed {
            message: "moov atom not found".to_string(),
        })
        .unwrap();
        assert_eq!(s.phase(), SessionPhase::Failed);
        match s.outcome().unwrap() {
            TrimOutcome::Failed { message } => assert_eq!(message, "moov atom not found"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
