// License: MIT

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::core::{
    events::Event,
    probe::FocusProbe,
    status::StatusSnapshot,
    tracker::{Action, TrackerState},
    tracker_msg::TrackerMsg,
    utils::now_ms,
};
use crate::services::watcher::{self, WatcherConfig};
use crate::{fdebug, ferror, finfo, fwarn};

use super::Daemon;

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
        watcher_cfg: WatcherConfig,
        probe: Arc<dyn FocusProbe>,
    ) -> eyre::Result<()> {
        finfo!("Daemon", "starting");

        let (tx, mut rx) = mpsc::channel::<TrackerMsg>(256);

        if let Err(e) = crate::ipc::server::spawn_ipc_server(tx.clone()) {
            fwarn!("IPC", "failed to start: {}", e);
        }

        tokio::spawn(watcher::run_watcher(tx.clone(), watcher_cfg, probe));

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        finfo!("Daemon", "stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        finfo!("Daemon", "stopping (event channel closed)");
                        break;
                    };

                    match msg {
                        TrackerMsg::Event(event) => {
                            fdebug!("Daemon", "event at {} ms: {:?}", event.now_ms(), event);

                            match self.tracker.handle_event(event) {
                                Ok(actions) => {
                                    for action in actions {
                                        if let Err(e) = self.exec_action(action) {
                                            ferror!("Sink", "{}", e);
                                        }
                                    }
                                }
                                Err(e) => ferror!("Daemon", "event rejected: {}", e),
                            }
                        }

                        TrackerMsg::StartTracking { reply } => {
                            let out = match self.tracker.handle_event(Event::StartTracking {
                                now_ms: now_ms(),
                            }) {
                                Ok(_) => {
                                    finfo!("Tracker", "tracking started");
                                    Ok("Tracking started".to_string())
                                }
                                Err(e) => Err(format!("cannot start: {e}")),
                            };
                            let _ = reply.send(out);
                        }

                        TrackerMsg::StopTracking { reply } => {
                            let _ = reply.send(self.finalize(Event::StopTracking {
                                now_ms: now_ms(),
                            }, "Tracking stopped"));
                        }

                        TrackerMsg::Flush { reply } => {
                            let _ = reply.send(self.finalize(Event::Flush {
                                now_ms: now_ms(),
                            }, "Log flushed"));
                        }

                        TrackerMsg::GetStatus { reply } => {
                            let _ = reply.send(self.status_snapshot(now_ms()));
                        }

                        TrackerMsg::StopDaemon { reply } => {
                            finfo!("Daemon", "stopping (quit requested via IPC)");
                            let _ = reply.send(Ok("Stopping focuslog daemon".to_string()));
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                    }
                }
            }
        }

        self.finalize_on_shutdown();

        Ok(())
    }

    /// Runs a stop/flush event and executes the export it emits. A sink
    /// failure is reported to the caller; the in-memory log stays intact so
    /// the command can simply be retried.
    fn finalize(&mut self, event: Event, verb: &str) -> Result<String, String> {
        let actions = match self.tracker.handle_event(event) {
            Ok(actions) => actions,
            Err(e) => return Err(format!("{e}")),
        };

        let mut written = Vec::new();
        for action in actions {
            match self.exec_action(action) {
                Ok(summary) => written.push(summary),
                Err(e) => return Err(e),
            }
        }

        if written.is_empty() {
            Ok(verb.to_string())
        } else {
            Ok(format!("{verb}; {}", written.join("; ")))
        }
    }

    fn exec_action(&self, action: Action) -> Result<String, String> {
        match action {
            Action::ExportLog { rows } => {
                match super::sink::write_log(&self.output_base, &rows) {
                    Ok(path) => {
                        finfo!("Sink", "wrote {} rows to {}", rows.len(), path.display());
                        Ok(format!("wrote {} rows to {}", rows.len(), path.display()))
                    }
                    Err(e) => Err(e.to_string()),
                }
            }
        }
    }

    /// A daemon going down with a live segment still exports its log.
    fn finalize_on_shutdown(&mut self) {
        if self.tracker.state() != TrackerState::Running {
            return;
        }

        match self.finalize(Event::StopTracking { now_ms: now_ms() }, "Final export") {
            Ok(msg) => finfo!("Daemon", "{}", msg),
            Err(e) => ferror!("Sink", "final export failed: {}", e),
        }
    }

    fn status_snapshot(&self, now_ms: u64) -> StatusSnapshot {
        let tracking = self.tracker.state() == TrackerState::Running;
        let current_application = self.tracker.open_application().map(String::from);
        let open_seconds = self.tracker.open_elapsed_ms(now_ms) / 1000;
        let closed_segments = self.tracker.closed_len();

        let pretty_text = match &current_application {
            Some(app) => format!(
                "state: tracking\napplication: {app}\nopen for: {}s\nclosed segments: {closed_segments}",
                open_seconds
            ),
            None if tracking => format!(
                "state: tracking (no focus observed yet)\nclosed segments: {closed_segments}"
            ),
            None => format!("state: idle\nclosed segments: {closed_segments}"),
        };

        StatusSnapshot {
            tracking,
            current_application,
            open_seconds,
            closed_segments,
            pretty_text,
        }
    }
}
