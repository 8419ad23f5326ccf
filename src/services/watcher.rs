// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::task;
use tokio::time::{Duration, sleep, timeout};

use crate::core::events::Event;
use crate::core::probe::FocusProbe;
use crate::core::tracker_msg::TrackerMsg;
use crate::core::utils::now_ms;
use crate::{fdebug, finfo, fwarn};

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub interval_ms: u64,
    pub probe_timeout_ms: u64,
}

/// The activity trigger: a fixed-interval loop that samples focus and feeds
/// the tracker. The tracker does its own duplicate suppression, so every
/// sample is forwarded; whether tracking is running is not this loop's
/// concern.
pub async fn run_watcher(tx: Sender<TrackerMsg>, cfg: WatcherConfig, probe: Arc<dyn FocusProbe>) {
    finfo!("Watcher", "started (interval {} ms)", cfg.interval_ms);

    loop {
        sleep(Duration::from_millis(cfg.interval_ms)).await;

        let app = sample(Arc::clone(&probe), cfg.probe_timeout_ms).await;

        let event = Event::FocusSample {
            app,
            now_ms: now_ms(),
        };

        // If the daemon is gone, stop.
        if tx.send(TrackerMsg::Event(event)).await.is_err() {
            fwarn!("Watcher", "stopping (receiver dropped)");
            break;
        }
    }
}

/// Runs one bounded probe. A probe that stalls past the deadline counts as a
/// failed sample, which the tracker records under the placeholder identifier.
async fn sample(probe: Arc<dyn FocusProbe>, timeout_ms: u64) -> Option<String> {
    let fut = task::spawn_blocking(move || probe.probe());

    match timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(Ok(Ok(app))) => Some(app),
        Ok(Ok(Err(e))) => {
            fdebug!("Watcher", "probe failed: {}", e);
            None
        }
        Ok(Err(e)) => {
            fwarn!("Watcher", "probe task panicked: {}", e);
            None
        }
        Err(_) => {
            fdebug!("Watcher", "probe timed out after {} ms", timeout_ms);
            None
        }
    }
}
