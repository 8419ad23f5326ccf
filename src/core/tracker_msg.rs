// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::Event, status::StatusSnapshot};

#[derive(Debug)]
pub enum TrackerMsg {
    Event(Event),

    GetStatus { reply: oneshot::Sender<StatusSnapshot> },

    StartTracking {
        reply: oneshot::Sender<Result<String, String>>,
    },

    StopTracking {
        reply: oneshot::Sender<Result<String, String>>,
    },

    Flush {
        reply: oneshot::Sender<Result<String, String>>,
    },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
