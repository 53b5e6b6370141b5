//! Lifecycle events reported to the embedding application.
//!
//! The widget communicates with its host through a flat event stream with
//! serializable payloads; times cross the boundary as whole milliseconds.

use serde::Serialize;

use crate::session::TrimOutcome;

/// One lifecycle event, ready for serialization across the host boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "payload", rename_all = "camelCase")]
pub enum TrimmerEvent {
    /// Asset finished loading; the trimmer is about to become interactive
    #[serde(rename_all = "camelCase")]
    OnLoad { duration: i64 },
    /// Trim invocation started
    OnStartTrimming,
    /// Time-based progress from the external tool
    #[serde(rename_all = "camelCase")]
    OnStatistics { time: i64 },
    /// The cut was written
    #[serde(rename_all = "camelCase")]
    OnFinishTrimming {
        output_path: String,
        start_time: i64,
        end_time: i64,
        duration: i64,
    },
    /// Trim invocation cancelled by the user
    OnCancelTrimming,
    /// Terminal failure; message is the external tool's diagnostic
    #[serde(rename_all = "camelCase")]
    OnError { message: String },
    /// Log line forwarded from the external tool
    #[serde(rename_all = "camelCase")]
    OnLog { level: String, message: String },
}

impl TrimmerEvent {
    /// Map a terminal trim outcome to its host-facing event
    pub fn from_outcome(outcome: &TrimOutcome) -> TrimmerEvent {
        match outcome {
            TrimOutcome::Success {
                output_path,
                start,
                end,
                duration,
            } => TrimmerEvent::OnFinishTrimming {
                output_path: output_path.clone(),
                start_time: start.as_millis(),
                end_time: end.as_millis(),
                duration: duration.as_millis(),
            },
            TrimOutcome::Cancelled => TrimmerEvent::OnCancelTrimming,
            TrimOutcome::Failed { message } => TrimmerEvent::OnError {
                message: message.clone(),
            },
        }
    }
}

/// Host-provided sink the core emits events into
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &TrimmerEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeSpec;

    #[test]
    fn test_event_names_are_camel_case() {
        let json = serde_json::to_value(&TrimmerEvent::OnCancelTrimming).unwrap();
        assert_eq!(json["name"], "onCancelTrimming");

        let json = serde_json::to_value(&TrimmerEvent::OnLoad { duration: 30000 }).unwrap();
        assert_eq!(json["name"], "onLoad");
        assert_eq!(json["payload"]["duration"], 30000);
    }

    #[test]
    fn test_finish_event_carries_requested_bounds() {
        let outcome = TrimOutcome::Success {
            output_path: "/docs/trimmedVideo_1.mp4".to_string(),
            start: TimeSpec::from_millis(1000),
            end: TimeSpec::from_millis(5000),
            duration: TimeSpec::from_millis(4000),
        };
        let json = serde_json::to_value(TrimmerEvent::from_outcome(&outcome)).unwrap();
        assert_eq!(json["name"], "onFinishTrimming");
        assert_eq!(json["payload"]["outputPath"], "/docs/trimmedVideo_1.mp4");
        assert_eq!(json["payload"]["startTime"], 1000);
        assert_eq!(json["payload"]["endTime"], 5000);
        assert_eq!(json["payload"]["duration"], 4000);
    }

    #[test]
    fn test_failure_message_passes_through() {
        let outcome = TrimOutcome::Failed {
            message: "rc 1: invalid data".to_string(),
        };
        match TrimmerEvent::from_outcome(&outcome) {
            TrimmerEvent::OnError { message } => assert_eq!(message, "rc 1: invalid data"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
