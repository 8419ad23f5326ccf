// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

fn lock_path() -> PathBuf {
    crate::ipc::runtime_dir().join("focuslog").join("focuslog.lock")
}

/// Binds an abstract lock socket so a second daemon refuses to start. A
/// stale path left by a crashed run is detected by a failed connect and
/// reclaimed.
pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    let path = lock_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(&path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(&path) {
            Ok(_) => Err(format!(
                "focuslog is already running (another instance holds {})",
                path.display()
            )),
            Err(_) => {
                let _ = std::fs::remove_file(&path);
                UnixListener::bind(&path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
            }
        },
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

/// Default base path for exported logs; `--output` overrides it.
pub fn default_output_base() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("focuslog");
    path.push("activity_log");
    path
}
