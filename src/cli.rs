// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "focuslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Focuslog activity tracker"
)]
pub struct Args {
    /// Base path for exported logs; a `_HH-MM-SS.csv` suffix is appended.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Focus sampling interval in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub interval: u64,

    /// Upper bound on a single focus probe in milliseconds; a slower probe
    /// counts as a failed sample.
    #[arg(long, value_name = "MS", default_value_t = 300)]
    pub probe_timeout: u64,

    /// Browser application name whose active tab title refines the logged
    /// identifier. Repeatable; replaces the built-in list when given.
    #[arg(long = "browser", value_name = "NAME")]
    pub browsers: Vec<String>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Begin tracking foreground-application focus")]
    Start,

    #[command(about = "Finalize the open segment and stop tracking")]
    Stop,

    #[command(about = "Write the activity log to disk without stopping tracking")]
    Flush,

    #[command(about = "Display current tracking status")]
    Status {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Shut down the focuslog daemon")]
    Quit,
}
