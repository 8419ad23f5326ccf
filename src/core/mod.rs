// License: MIT

pub mod error;
pub mod events;
pub mod logbook;
pub mod probe;
pub mod status;
pub mod tracker;
pub mod tracker_msg;
pub mod utils;

#[cfg(test)]
mod tracker_tests;
