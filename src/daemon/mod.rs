// License: MIT

mod run;
pub mod sink;

use std::path::PathBuf;

use crate::core::tracker::Tracker;

pub struct Daemon {
    tracker: Tracker,
    output_base: PathBuf,
}

impl Daemon {
    pub fn new(output_base: PathBuf) -> Self {
        Self {
            tracker: Tracker::new(),
            output_base,
        }
    }
}
