// License: MIT

use crate::core::{
    error::{Error, StateError},
    events::{Event, UNKNOWN_APP},
    logbook::LogRow,
};

/// Side effect emitted by the tracker for the daemon to execute. The tracker
/// itself never touches the filesystem or the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ExportLog { rows: Vec<LogRow> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Running,
}

/// A finished focus interval. Durations stay in milliseconds until export so
/// repeated flushes re-derive the formatted time instead of re-parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    application: String,
    duration_ms: u64,
}

/// The activity-tracking engine: folds a stream of focus samples into
/// contiguous per-application segments.
///
/// Invariants:
/// - at most one open segment exists, and only while tracking;
/// - the closed log is append-only and survives stop/start within the
///   process (nothing is persisted across restarts);
/// - an exported snapshot may carry one provisional trailing row for the
///   open segment. That row lives only in the export: the next flush
///   re-derives it, so flushing never grows the in-memory log.
#[derive(Debug)]
pub struct Tracker {
    state: TrackerState,
    open_application: Option<String>,
    open_started_ms: u64,
    closed: Vec<Segment>,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
            open_application: None,
            open_started_ms: 0,
            closed: Vec::new(),
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Result<Vec<Action>, Error> {
        match event {
            Event::StartTracking { .. } => {
                if self.state == TrackerState::Running {
                    return Err(Error::InvalidState(StateError::AlreadyTracking));
                }

                self.state = TrackerState::Running;
                Ok(Vec::new())
            }

            Event::FocusSample { app, now_ms } => {
                // Samples in flight after a stop are dropped here.
                if self.state != TrackerState::Running {
                    return Ok(Vec::new());
                }

                let current = app.unwrap_or_else(|| UNKNOWN_APP.to_string());

                match &self.open_application {
                    // Same application still focused: nothing to record.
                    Some(open) if *open == current => {}

                    Some(_) => {
                        self.close_open_segment(now_ms);
                        self.open_application = Some(current);
                        self.open_started_ms = now_ms;
                    }

                    // First observation since start: opens a segment, no row.
                    None => {
                        self.open_application = Some(current);
                        self.open_started_ms = now_ms;
                    }
                }

                Ok(Vec::new())
            }

            Event::Flush { now_ms } => Ok(vec![Action::ExportLog {
                rows: self.materialized_rows(now_ms),
            }]),

            Event::StopTracking { now_ms } => {
                if self.open_application.is_some() {
                    self.close_open_segment(now_ms);
                    self.open_application = None;
                    self.open_started_ms = 0;
                }

                self.state = TrackerState::Idle;

                Ok(vec![Action::ExportLog {
                    rows: self.materialized_rows(now_ms),
                }])
            }
        }
    }

    fn close_open_segment(&mut self, now_ms: u64) {
        if let Some(application) = self.open_application.clone() {
            self.closed.push(Segment {
                application,
                duration_ms: now_ms.saturating_sub(self.open_started_ms),
            });
        }
    }

    /// Closed rows plus, while a segment is open, one provisional row whose
    /// duration is measured as of `now_ms`.
    fn materialized_rows(&self, now_ms: u64) -> Vec<LogRow> {
        let mut rows: Vec<LogRow> = self
            .closed
            .iter()
            .map(|s| LogRow::new(s.application.clone(), s.duration_ms))
            .collect();

        if let Some(open) = &self.open_application {
            rows.push(LogRow::new(
                open.clone(),
                now_ms.saturating_sub(self.open_started_ms),
            ));
        }

        rows
    }

    // ---------------- status accessors ----------------

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn open_application(&self) -> Option<&str> {
        self.open_application.as_deref()
    }

    pub fn open_elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.open_application.is_some() {
            now_ms.saturating_sub(self.open_started_ms)
        } else {
            0
        }
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
