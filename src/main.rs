// License: MIT

mod app;
mod cli;
mod core;
mod daemon;
mod ipc;
mod log;
mod services;

use clap::Parser;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    if args.command.is_some() {
        return app::command::run(args).await;
    }

    app::daemon_mode::run(args).await
}
