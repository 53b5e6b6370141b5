//! Integration tests for the editor pipeline around the scheduler: probed
//! asset in, thumbnail request sets, trim command out, session bookkeeping
//! and host events

use std::fs;

use tempfile::TempDir;
use videotrim_core::session::SessionPhase;
use videotrim_core::thumbs::ThumbnailDisposition;
use videotrim_core::*;

// Test utilities

/// A 30s probed asset with square frames
fn probed_asset() -> AssetInfo {
    AssetInfo::new(
        TimeSpec::from_seconds(30.0),
        true,
        true,
        Some(FrameSize {
            width: 1080.0,
            height: 1080.0,
        }),
    )
    .unwrap()
}

// Scheduler across a zoom transition

#[test]
fn test_zoom_transition_supersedes_thumbnail_set() {
    let asset = probed_asset();
    let mut state = SelectionState::new(asset.full_range());
    let mut scheduler = ThumbnailScheduler::new(&asset);
    let viewport = Viewport::new(300.0, 50.0);

    let initial = scheduler.plan(&state.visible_range(), viewport).unwrap();
    assert_eq!(initial.requests.len(), 15);

    // narrow the visible window the way a zoom does
    state.begin_trailing_drag();
    state.update_trailing_drag(TimeSpec::from_seconds(20.0));
    let zoomed = TimeRange::from_seconds(18.5, 20.5);
    let replanned = scheduler.plan(&zoomed, viewport).unwrap();

    // the earlier set is stale the moment the new one is issued
    assert_eq!(
        scheduler.disposition(initial.generation),
        ThumbnailDisposition::Discard
    );
    assert_eq!(
        scheduler.disposition(replanned.generation),
        ThumbnailDisposition::Display
    );
    // zoomed timestamps are spread over the window, never negative
    assert!(replanned
        .requests
        .iter()
        .all(|r| r.timestamp >= TimeSpec::ZERO));
    assert!(replanned
        .requests
        .iter()
        .any(|r| zoomed.contains(r.timestamp)));
}

#[test]
fn test_unchanged_frame_does_not_reissue_requests() {
    let asset = probed_asset();
    let mut scheduler = ThumbnailScheduler::new(&asset);
    let viewport = Viewport::new(300.0, 50.0);
    let range = asset.full_range();

    let plan = scheduler.plan(&range, viewport).unwrap();
    // steady-state frames: same range, same viewport, no churn
    for _ in 0..5 {
        assert!(scheduler.plan(&range, viewport).is_none());
    }
    assert_eq!(scheduler.current_generation(), plan.generation);
}

// Config-driven selection and command construction

#[test]
fn test_config_limits_flow_into_selection() {
    let config = EditorConfig::from_toml_str(
        r#"
        min_duration_ms = 2000
        max_duration_ms = 15000
        enable_rotation = true
        rotation_angle = 90
        "#,
    )
    .unwrap();

    let asset = probed_asset();
    let mut state = SelectionState::with_limits(
        asset.full_range(),
        config.minimum_duration(),
        config.maximum_duration(),
    );

    state.begin_trailing_drag();
    let feedback = state.update_trailing_drag(TimeSpec::from_seconds(20.0));
    assert!(feedback.boundary_hit);
    assert_eq!(state.selected_range().end(), TimeSpec::from_seconds(15.0));
    state.end_drag();

    let mut command = TrimCommand::new("in.mp4", "out.mp4", state.selected_range())
        .with_metadata_timestamp("2024-05-01T10:00:00.000000+0000");
    if let Some(angle) = config.rotation() {
        command = command.with_rotation(angle);
    }

    assert_eq!(
        command.to_args(),
        vec![
            "-ss",
            "0ms",
            "-to",
            "15000ms",
            "-display_rotation",
            "90",
            "-i",
            "in.mp4",
            "-c",
            "copy",
            "-metadata",
            "creation_time=2024-05-01T10:00:00.000000+0000",
            "out.mp4",
        ]
    );
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("editor.toml");
    fs::write(
        &path,
        "output_ext = \"mov\"\nmedia_type = \"audio\"\nmax_duration_ms = -1\n",
    )
    .unwrap();

    let config = EditorConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.output_ext, "mov");
    assert_eq!(config.media_type, MediaType::Audio);
    // non-positive maximum means unbounded
    assert_eq!(config.maximum_duration(), None);
    // unspecified fields keep their defaults
    assert_eq!(config.minimum_duration(), TimeSpec::from_seconds(1.0));
    assert!(config.enable_haptic_feedback);
}

#[test]
fn test_malformed_config_is_reported() {
    let result = EditorConfig::from_toml_str("min_duration_ms = \"soon\"");
    assert!(matches!(result, Err(TrimError::ConfigError { .. })));
}

// Session bookkeeping and the event surface

#[test]
fn test_session_relays_outcome_as_host_event() {
    let selected = TimeRange::from_seconds(2.0, 10.0);
    let command = TrimCommand::new("in.mp4", "out.mp4", selected);
    let mut session = TrimSession::new(&command);

    session.start().unwrap();
    assert_eq!(session.phase(), SessionPhase::Running);

    // tool reports processed media time; fraction is against the cut length
    let fraction = session.record_elapsed(TimeSpec::from_seconds(4.0));
    assert!((fraction - 0.5).abs() < 1e-9);

    let outcome = TrimOutcome::Success {
        output_path: "out.mp4".to_string(),
        start: selected.start(),
        end: selected.end(),
        duration: selected.duration(),
    };
    session.finish(outcome.clone()).unwrap();
    assert_eq!(session.phase(), SessionPhase::Complete);
    assert!(session.is_finished());

    let event = TrimmerEvent::from_outcome(&outcome);
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["name"], "onFinishTrimming");
    assert_eq!(json["payload"]["outputPath"], "out.mp4");
}

#[test]
fn test_cancelled_session_is_not_an_error() {
    let command = TrimCommand::new("in.mp4", "out.mp4", TimeRange::from_seconds(0.0, 5.0));
    let mut session = TrimSession::new(&command);

    session.start().unwrap();
    session.finish(TrimOutcome::Cancelled).unwrap();
    assert_eq!(session.phase(), SessionPhase::Cancelled);

    let json = serde_json::to_value(TrimmerEvent::from_outcome(&TrimOutcome::Cancelled)).unwrap();
    assert_eq!(json["name"], "onCancelTrimming");
}

#[test]
fn test_failed_session_carries_tool_diagnostics_verbatim() {
    let command = TrimCommand::new("in.mp4", "out.mp4", TimeRange::from_seconds(0.0, 5.0));
    let mut session = TrimSession::new(&command);

    session.start().unwrap();
    let outcome = TrimOutcome::Failed {
        message: "in.mp4: Invalid data found when processing input".to_string(),
    };
    session.finish(outcome.clone()).unwrap();
    assert_eq!(session.phase(), SessionPhase::Failed);

    let json = serde_json::to_value(TrimmerEvent::from_outcome(&outcome)).unwrap();
    assert_eq!(json["name"], "onError");
    assert_eq!(
        json["payload"]["message"],
        "in.mp4: Invalid data found when processing input"
    );
}
