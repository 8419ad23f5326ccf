// License: MIT

/// Identifier recorded when the focus probe fails or times out. It behaves
/// like any other application so gaps stay visible in the exported log.
pub const UNKNOWN_APP: &str = "<unknown>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A trigger fired and the focus probe produced a sample.
    /// `app` is `None` when the probe failed.
    FocusSample {
        app: Option<String>,
        now_ms: u64,
    },

    StartTracking {
        now_ms: u64,
    },

    /// Finalize the open segment into the log and go idle.
    StopTracking {
        now_ms: u64,
    },

    /// Materialize the log as of now without closing the open segment.
    Flush {
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::FocusSample { now_ms, .. }
            | Event::StartTracking { now_ms }
            | Event::StopTracking { now_ms }
            | Event::Flush { now_ms } => *now_ms,
        }
    }
}
