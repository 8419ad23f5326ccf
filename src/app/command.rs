// License: MIT

use crate::cli::{Args, Command};

pub async fn run(args: Args) -> eyre::Result<()> {
    let Some(cmd) = args.command.as_ref() else {
        return Ok(());
    };

    match cmd {
        Command::Start => {
            match crate::ipc::client::send_raw("start").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Tracking started");
                    } else {
                        println!("{out}");
                    }
                }
                Err(e) => eprintln!("focuslog: {e}"),
            }
            Ok(())
        }

        Command::Stop => {
            match crate::ipc::client::send_raw("stop").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Tracking stopped");
                    } else {
                        println!("{out}");
                    }
                }
                Err(e) => eprintln!("focuslog: {e}"),
            }
            Ok(())
        }

        Command::Flush => {
            match crate::ipc::client::send_raw("flush").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Log flushed");
                    } else {
                        println!("{out}");
                    }
                }
                Err(e) => eprintln!("focuslog: {e}"),
            }
            Ok(())
        }

        Command::Status { json } => {
            let msg = if *json { "status --json" } else { "status" };

            match crate::ipc::client::send_raw(msg).await {
                Ok(resp) => {
                    if !resp.is_empty() {
                        println!("{resp}");
                    }
                }
                Err(e) => {
                    if *json {
                        // Keep stdout valid JSON even when the daemon is down.
                        println!(
                            "{}",
                            r#"{"tracking":false,"current_application":null,"open_seconds":0,"closed_segments":0}"#
                        );
                    } else {
                        eprintln!("focuslog: {e}");
                    }
                }
            }
            Ok(())
        }

        Command::Quit => {
            match crate::ipc::client::send_raw("quit").await {
                Ok(resp) => {
                    let out = resp.trim_end();
                    if out.is_empty() {
                        println!("Stopping focuslog daemon");
                    } else {
                        println!("{out}");
                    }
                }
                Err(e) => eprintln!("focuslog: {e}"),
            }
            Ok(())
        }
    }
}
