//! FFmpeg execution adapter.
//!
//! Runs a built trim command as an external `ffmpeg` process. Progress is
//! read from the machine-readable `-progress` stream on stdout and scaled
//! against the requested selection duration; diagnostics are collected from
//! stderr and surfaced verbatim on failure. Cancellation is cooperative: a
//! quit keystroke is written to the child's stdin and the process is left to
//! wind down on its own, never force-killed.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::command::TrimCommand;
use crate::domain::errors::DomainError;
use crate::domain::model::TimeSpec;
use crate::ports::ExecutePort;
use crate::session::{TrimOutcome, TrimProgress};

/// How often the cancel flag is checked between progress lines
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// FFmpeg-based execute adapter
pub struct FfmpegExecAdapter {
    binary: String,
}

impl FfmpegExecAdapter {
    /// Adapter using `ffmpeg` from the search path
    pub fn new() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
        }
    }

    /// Adapter using an explicit ffmpeg binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Progress fraction for one `out_time_us` sample
    fn fraction_for(elapsed_us: i64, total: TimeSpec) -> f64 {
        if total.seconds <= 0.0 {
            return 0.0;
        }
        (elapsed_us as f64 / 1_000_000.0 / total.seconds).clamp(0.0, 1.0)
    }

    /// Map the child's exit to an outcome. A quit request can race a clean
    /// exit; a zero status means the output was fully written, so it counts
    /// as success even when a cancel was asked for.
    fn outcome_for(
        command: &TrimCommand,
        exited_cleanly: bool,
        quit_requested: bool,
        diagnostics: &str,
    ) -> TrimOutcome {
        if exited_cleanly {
            TrimOutcome::Success {
                output_path: command.output_path.clone(),
                start: command.start,
                end: command.end,
                duration: command.selected_duration(),
            }
        } else if quit_requested {
            TrimOutcome::Cancelled
        } else {
            let message = diagnostics.trim();
            TrimOutcome::Failed {
                message: if message.is_empty() {
                    "ffmpeg exited with a failure status".to_string()
                } else {
                    message.to_string()
                },
            }
        }
    }
}

impl Default for FfmpegExecAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutePort for FfmpegExecAdapter {
    async fn execute_trim(
        &self,
        command: &TrimCommand,
        progress: Arc<dyn TrimProgress>,
    ) -> Result<TrimOutcome, DomainError> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-nostats".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-progress".to_string(),
            "pipe:1".to_string(),
            "-y".to_string(),
        ];
        args.extend(command.to_args());
        info!(command = %args.join(" "), "starting trim invocation");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DomainError::ExecFailed("child stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DomainError::ExecFailed("child stdout unavailable".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DomainError::ExecFailed("child stderr unavailable".to_string()))?;

        progress.on_start();

        // forward diagnostics as they appear and keep them for the outcome
        let log_observer = Arc::clone(&progress);
        let stderr_task = tokio::spawn(async move {
            let mut collected = String::new();
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                log_observer.on_log(&line);
                collected.push_str(&line);
                collected.push('\n');
            }
            collected
        });

        let total = command.selected_duration();
        let mut quit_requested = false;
        let mut lines = BufReader::new(stdout).lines();
        // the cancel flag is checked on a timer as well, so a cancel between
        // progress lines is forwarded without waiting for the next line
        let mut poll = tokio::time::interval(CANCEL_POLL_INTERVAL);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if let Some(value) = line.strip_prefix("out_time_us=") {
                        if let Ok(elapsed_us) = value.trim().parse::<i64>() {
                            progress.on_progress(Self::fraction_for(elapsed_us, total));
                        }
                    }
                }
                _ = poll.tick() => {}
            }
            if !quit_requested && progress.should_cancel() {
                debug!("forwarding cancel request to external tool");
                let _ = stdin.write_all(b"q\n").await;
                let _ = stdin.flush().await;
                quit_requested = true;
            }
        }
        drop(stdin);

        let status = child.wait().await?;
        let diagnostics = stderr_task.await.unwrap_or_default();

        let outcome = Self::outcome_for(command, status.success(), quit_requested, &diagnostics);
        if matches!(outcome, TrimOutcome::Success { .. }) {
            progress.on_progress(1.0);
        }
        progress.on_complete(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeRange;

    #[test]
    fn test_fraction_scaling() {
        let total = TimeSpec::from_seconds(4.0);
        assert_eq!(FfmpegExecAdapter::fraction_for(0, total), 0.0);
        assert!((FfmpegExecAdapter::fraction_for(2_000_000, total) - 0.5).abs() < 1e-9);
        assert_eq!(FfmpegExecAdapter::fraction_for(4_000_000, total), 1.0);
        // overshoot past the requested duration stays clamped
        assert_eq!(FfmpegExecAdapter::fraction_for(9_000_000, total), 1.0);
    }

    #[test]
    fn test_fraction_with_degenerate_total() {
        assert_eq!(FfmpegExecAdapter::fraction_for(1_000_000, TimeSpec::ZERO), 0.0);
    }

    fn command() -> TrimCommand {
        TrimCommand::new("in.mp4", "out.mp4", TimeRange::from_seconds(2.0, 10.0))
    }

    #[test]
    fn test_clean_exit_after_quit_request_is_success() {
        // cancel raced the final progress line; the output was fully written
        let outcome = FfmpegExecAdapter::outcome_for(&command(), true, true, "");
        assert!(matches!(outcome, TrimOutcome::Success { .. }));
    }

    #[test]
    fn test_quit_request_with_failure_status_is_cancelled() {
        let outcome = FfmpegExecAdapter::outcome_for(&command(), false, true, "");
        assert_eq!(outcome, TrimOutcome::Cancelled);
    }

    #[test]
    fn test_failure_carries_diagnostics_verbatim() {
        let outcome = FfmpegExecAdapter::outcome_for(
            &command(),
            false,
            false,
            "in.mp4: Invalid data found when processing input\n",
        );
        assert_eq!(
            outcome,
            TrimOutcome::Failed {
                message: "in.mp4: Invalid data found when processing input".to_string()
            }
        );
    }

    #[test]
    fn test_failure_without_diagnostics_still_reports() {
        let outcome = FfmpegExecAdapter::outcome_for(&command(), false, false, "  \n");
        assert!(matches!(outcome, TrimOutcome::Failed { message } if !message.is_empty()));
    }
}
