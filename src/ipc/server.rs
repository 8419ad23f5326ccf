// License: MIT

use std::fs;
use std::io;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{Duration, timeout},
};

use crate::core::tracker_msg::TrackerMsg;
use crate::{fdebug, ferror, finfo};

use super::router::route_command;

/// Binds the control socket and spawns the accept loop.
pub fn spawn_ipc_server(tx: mpsc::Sender<TrackerMsg>) -> io::Result<()> {
    let path = crate::ipc::socket_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // A previous run may have left a stale socket behind.
    if path.exists() {
        let _ = fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)?;
    finfo!("IPC", "listening on {}", path.display());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(Duration::from_secs(10), async {
                            if let Err(e) = handle_connection(&mut stream, tx).await {
                                ferror!("IPC", "error handling connection: {}", e);
                            }
                        })
                        .await;

                        if result.is_err() {
                            ferror!("IPC", "connection timed out after 10 seconds");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => ferror!("IPC", "failed to accept connection: {}", e),
            }
        }
    });

    Ok(())
}

/// Handles a single one-shot command connection.
async fn handle_connection(
    stream: &mut UnixStream,
    tx: mpsc::Sender<TrackerMsg>,
) -> io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();
    fdebug!("IPC", "received command: {}", cmd);

    let response = route_command(&cmd, &tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
