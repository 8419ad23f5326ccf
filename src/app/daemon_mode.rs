// License: MIT

use std::sync::Arc;

use eyre::eyre;

use crate::cli::Args;
use crate::core::probe::FocusProbe;
use crate::daemon::Daemon;
use crate::services::probe::{self, UnavailableProbe};
use crate::services::watcher::WatcherConfig;
use crate::{finfo, fwarn};

pub async fn run(args: Args) -> eyre::Result<()> {
    // single-instance
    let _instance_lock =
        crate::app::platform::acquire_single_instance_lock().map_err(|e| eyre!(e))?;

    crate::log::set_verbose(args.verbose);

    finfo!("Focuslog", "starting (log file: {})", crate::log::log_path().display());

    let output_base = args
        .output
        .clone()
        .unwrap_or_else(crate::app::platform::default_output_base);
    finfo!("Focuslog", "export base path: {}", output_base.display());

    let browsers = if args.browsers.is_empty() {
        probe::default_browsers()
    } else {
        args.browsers.clone()
    };

    let probe: Arc<dyn FocusProbe> = match probe::create(browsers) {
        Ok(p) => p,
        Err(e) => {
            fwarn!("Probe", "unavailable, samples will log as placeholder: {}", e);
            Arc::new(UnavailableProbe::new(e.to_string()))
        }
    };

    let watcher_cfg = WatcherConfig {
        interval_ms: args.interval.max(50),
        probe_timeout_ms: args.probe_timeout.max(10),
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(output_base);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx, watcher_cfg, probe).await }
    });

    tokio::select! {
        res = &mut daemon_task => {
            res.map_err(|join_err| eyre!(join_err))?
        }

        _ = tokio::signal::ctrl_c() => {
            finfo!("Focuslog", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            daemon_task.await.map_err(|join_err| eyre!(join_err))?
        }
    }
}
