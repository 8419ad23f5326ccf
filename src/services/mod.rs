// License: MIT

pub mod probe;
pub mod watcher;
