// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An event was rejected because it is invalid in the current state.
    ///
    /// Examples:
    /// - start while already tracking
    InvalidState(StateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    AlreadyTracking,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyTracking => write!(f, "already tracking"),
        }
    }
}

impl std::error::Error for Error {}
