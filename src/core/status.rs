// License: MIT

use serde::Serialize;

/// Snapshot returned from the daemon for `focuslog status`.
///
/// - the serialized form is the stable JSON contract for `status --json`.
/// - `pretty_text` is CLI-facing output for plain `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub tracking: bool,
    pub current_application: Option<String>,
    pub open_seconds: u64,
    pub closed_segments: usize,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}
