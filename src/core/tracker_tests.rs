// License: MIT

use crate::core::events::{Event, UNKNOWN_APP};
use crate::core::error::{Error, StateError};
use crate::core::logbook::LogRow;
use crate::core::tracker::{Action, Tracker, TrackerState};

fn sample(app: &str, now_ms: u64) -> Event {
    Event::FocusSample {
        app: Some(app.to_string()),
        now_ms,
    }
}

fn failed_sample(now_ms: u64) -> Event {
    Event::FocusSample { app: None, now_ms }
}

fn exported_rows(actions: Vec<Action>) -> Vec<LogRow> {
    assert_eq!(actions.len(), 1);
    let Action::ExportLog { rows } = actions.into_iter().next().unwrap();
    rows
}

fn row(application: &str, time: &str) -> LogRow {
    LogRow {
        application: application.to_string(),
        time: time.to_string(),
    }
}

#[test]
fn repeated_samples_of_same_app_do_not_fragment_log() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();

    tracker.handle_event(sample("editor", 1_000)).unwrap();
    tracker.handle_event(sample("editor", 5_000)).unwrap();
    tracker.handle_event(sample("editor", 9_000)).unwrap();

    // Segment start must still be the first observation, not a later one.
    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 10_000 })
            .unwrap(),
    );
    assert_eq!(rows, vec![row("editor", "0:00:09")]);
}

#[test]
fn focus_change_closes_segment_at_change_time() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();

    tracker.handle_event(sample("editor", 0)).unwrap();
    tracker.handle_event(sample("editor", 1_000)).unwrap();
    tracker.handle_event(sample("browser", 2_000)).unwrap();

    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 2_000 })
            .unwrap(),
    );
    assert_eq!(
        rows,
        vec![row("editor", "0:00:02"), row("browser", "0:00:00")]
    );
}

#[test]
fn first_observation_produces_no_row() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("editor", 0)).unwrap();

    assert_eq!(tracker.closed_len(), 0);
    assert_eq!(tracker.open_application(), Some("editor"));
}

#[test]
fn flush_is_non_destructive_and_monotonic() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("editor", 0)).unwrap();

    let first = exported_rows(tracker.handle_event(Event::Flush { now_ms: 5_000 }).unwrap());
    let second = exported_rows(tracker.handle_event(Event::Flush { now_ms: 8_000 }).unwrap());

    assert_eq!(first, vec![row("editor", "0:00:05")]);
    assert_eq!(second, vec![row("editor", "0:00:08")]);
    assert_eq!(first.len(), second.len());

    // The provisional row never closed the segment: the open segment keeps
    // extending and closes at the real focus change.
    tracker.handle_event(sample("browser", 10_000)).unwrap();
    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 12_000 })
            .unwrap(),
    );
    assert_eq!(
        rows,
        vec![row("editor", "0:00:10"), row("browser", "0:00:02")]
    );
}

#[test]
fn stop_finalizes_and_resets_open_segment() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("editor", 0)).unwrap();
    tracker.handle_event(sample("browser", 5_000)).unwrap();

    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 8_000 })
            .unwrap(),
    );
    assert_eq!(
        rows,
        vec![row("editor", "0:00:05"), row("browser", "0:00:03")]
    );
    assert_eq!(tracker.open_application(), None);
    assert_eq!(tracker.state(), TrackerState::Idle);

    // A fresh start has no memory of the previous open application: the
    // first observation opens a segment without logging a row.
    tracker.handle_event(Event::StartTracking { now_ms: 9_000 }).unwrap();
    tracker.handle_event(sample("terminal", 10_000)).unwrap();
    assert_eq!(tracker.closed_len(), 2);

    tracker.handle_event(sample("editor", 11_000)).unwrap();
    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 12_000 })
            .unwrap(),
    );
    assert_eq!(
        rows,
        vec![
            row("editor", "0:00:05"),
            row("browser", "0:00:03"),
            row("terminal", "0:00:01"),
            row("editor", "0:00:01"),
        ]
    );
}

#[test]
fn samples_after_stop_are_ignored() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("editor", 0)).unwrap();
    tracker.handle_event(Event::StopTracking { now_ms: 1_000 }).unwrap();

    // In-flight trigger events arriving after stop must not reopen anything.
    tracker.handle_event(sample("editor", 2_000)).unwrap();
    tracker.handle_event(sample("browser", 3_000)).unwrap();

    assert_eq!(tracker.open_application(), None);
    let rows = exported_rows(tracker.handle_event(Event::Flush { now_ms: 4_000 }).unwrap());
    assert_eq!(rows, vec![row("editor", "0:00:01")]);
}

#[test]
fn probe_failure_becomes_placeholder_application() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();

    tracker.handle_event(sample("editor", 0)).unwrap();
    tracker.handle_event(failed_sample(5_000)).unwrap();
    // Consecutive failures are duplicate-suppressed like any application.
    tracker.handle_event(failed_sample(6_000)).unwrap();
    tracker.handle_event(sample("browser", 8_000)).unwrap();

    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 9_000 })
            .unwrap(),
    );
    assert_eq!(
        rows,
        vec![
            row("editor", "0:00:05"),
            row(UNKNOWN_APP, "0:00:03"),
            row("browser", "0:00:01"),
        ]
    );
}

#[test]
fn start_while_running_is_rejected() {
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();

    let err = tracker
        .handle_event(Event::StartTracking { now_ms: 1_000 })
        .unwrap_err();
    assert_eq!(err, Error::InvalidState(StateError::AlreadyTracking));
}

#[test]
fn flush_while_idle_exports_closed_rows_only() {
    let mut tracker = Tracker::new();

    let rows = exported_rows(tracker.handle_event(Event::Flush { now_ms: 0 }).unwrap());
    assert!(rows.is_empty());

    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("editor", 0)).unwrap();
    tracker.handle_event(Event::StopTracking { now_ms: 3_000 }).unwrap();

    let rows = exported_rows(tracker.handle_event(Event::Flush { now_ms: 60_000 }).unwrap());
    assert_eq!(rows, vec![row("editor", "0:00:03")]);
}

#[test]
fn stop_while_idle_is_not_an_error() {
    let mut tracker = Tracker::new();
    let rows = exported_rows(tracker.handle_event(Event::StopTracking { now_ms: 0 }).unwrap());
    assert!(rows.is_empty());
}

#[test]
fn tracked_scenario_with_suppressed_event() {
    // start; A at 0s; A at 5s (suppressed); B at 10s; stop at 15s.
    let mut tracker = Tracker::new();
    tracker.handle_event(Event::StartTracking { now_ms: 0 }).unwrap();
    tracker.handle_event(sample("A", 0)).unwrap();
    tracker.handle_event(sample("A", 5_000)).unwrap();
    tracker.handle_event(sample("B", 10_000)).unwrap();

    let flushed = exported_rows(tracker.handle_event(Event::Flush { now_ms: 10_000 }).unwrap());
    assert_eq!(flushed[0], row("A", "0:00:10"));

    let rows = exported_rows(
        tracker
            .handle_event(Event::StopTracking { now_ms: 15_000 })
            .unwrap(),
    );
    assert_eq!(rows, vec![row("A", "0:00:10"), row("B", "0:00:05")]);
}
