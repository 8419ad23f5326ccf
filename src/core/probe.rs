// License: MIT

use std::fmt;

/// A query for the identifier of the currently focused application.
///
/// Platform implementations live in `services::probe`. The contract is
/// best-effort: a failure becomes one failed sample, never a crashed
/// tracker. Implementations must be callable from a blocking task, so the
/// watcher can bound each probe with a timeout.
pub trait FocusProbe: Send + Sync {
    fn probe(&self) -> Result<String, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The platform query failed (no display connection, no frontmost
    /// application, permission denial, ...).
    Query(String),

    /// No probe implementation exists for this platform.
    Unsupported,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Query(reason) => write!(f, "focus probe failed: {reason}"),
            ProbeError::Unsupported => write!(f, "no focus probe for this platform"),
        }
    }
}

impl std::error::Error for ProbeError {}
