// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::tracker_msg::TrackerMsg;

/// Routes a one-line command from the socket to the daemon's event loop.
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<TrackerMsg>) -> String {
    let result = match cmd {
        "start" => request(tx, |reply| TrackerMsg::StartTracking { reply }).await,

        "stop" => request(tx, |reply| TrackerMsg::StopTracking { reply }).await,

        "flush" => request(tx, |reply| TrackerMsg::Flush { reply }).await,

        "quit" => request(tx, |reply| TrackerMsg::StopDaemon { reply }).await,

        cmd if cmd.starts_with("status") => {
            let as_json = cmd.contains("--json");

            let (reply_tx, reply_rx) = oneshot::channel();
            if tx.send(TrackerMsg::GetStatus { reply: reply_tx }).await.is_err() {
                Err("daemon unavailable".to_string())
            } else {
                match reply_rx.await {
                    Ok(snapshot) => {
                        if as_json {
                            serde_json::to_string(&snapshot)
                                .map_err(|e| format!("ERROR: failed to encode status: {e}"))
                        } else {
                            Ok(snapshot.pretty_text)
                        }
                    }
                    Err(_) => Err("daemon dropped the request".to_string()),
                }
            }
        }

        _ => Err(format!("ERROR: Unknown command '{cmd}'")),
    };

    result.unwrap_or_else(|e| e)
}

async fn request(
    tx: &mpsc::Sender<TrackerMsg>,
    make: impl FnOnce(oneshot::Sender<Result<String, String>>) -> TrackerMsg,
) -> Result<String, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    tx.send(make(reply_tx))
        .await
        .map_err(|_| "daemon unavailable".to_string())?;

    reply_rx
        .await
        .map_err(|_| "daemon dropped the request".to_string())?
}
