use crate::{load_catalog, CatalogHandle, IndexerError, LoaderConfig, ReportScanner, Result};
use log::{error, info, warn};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::{broadcast, mpsc};
use tokio::time;

const FS_EVENT_REASON: &str = "fs_event";

#[derive(Debug, Clone, Copy)]
pub struct WatchConfig {
    /// Quiet period after the last matching event before reloading
    pub debounce: Duration,
    pub notify_poll_interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(750),
            notify_poll_interval: Duration::from_secs(2),
        }
    }
}

/// Outcome of one reload attempt.
#[derive(Debug, Clone)]
pub struct ReloadUpdate {
    pub completed_at: SystemTime,
    pub duration_ms: u64,
    pub reason: String,
    /// True when a new catalog was swapped in
    pub success: bool,
    pub records: Option<usize>,
    pub error: Option<String>,
}

enum WatcherCommand {
    Trigger { reason: String },
    Shutdown,
}

/// Watches the data directory and swaps in a rebuilt catalog when the
/// report changes. A rebuild that fails or comes back degraded leaves the
/// current catalog in place.
pub struct ReportWatcher {
    command_tx: mpsc::Sender<WatcherCommand>,
    update_tx: broadcast::Sender<ReloadUpdate>,
    _watcher: RecommendedWatcher,
}

impl ReportWatcher {
    /// Must be called from within a Tokio runtime.
    pub fn start(
        handle: Arc<CatalogHandle>,
        loader: LoaderConfig,
        config: WatchConfig,
    ) -> Result<Self> {
        let scanner = ReportScanner::from_config(&loader)?;
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(16);
        let (update_tx, _) = broadcast::channel(32);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = event_tx.blocking_send(res);
            },
            NotifyConfig::default().with_poll_interval(config.notify_poll_interval),
        )
        .map_err(|e| IndexerError::Other(format!("watcher init failed: {e}")))?;
        watcher
            .watch(scanner.dir(), RecursiveMode::NonRecursive)
            .map_err(|e| {
                IndexerError::Other(format!("failed to watch {}: {e}", scanner.dir().display()))
            })?;
        info!("Watching {} for report changes", scanner.dir().display());

        spawn_reload_loop(
            handle,
            loader,
            scanner,
            config,
            event_rx,
            command_rx,
            update_tx.clone(),
        );

        Ok(Self {
            command_tx,
            update_tx,
            _watcher: watcher,
        })
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<ReloadUpdate> {
        self.update_tx.subscribe()
    }

    /// Reloads without waiting for a file event.
    pub async fn trigger(&self, reason: impl Into<String>) -> Result<()> {
        self.command_tx
            .send(WatcherCommand::Trigger {
                reason: reason.into(),
            })
            .await
            .map_err(|_| IndexerError::Other("report watcher stopped".to_string()))
    }

    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(WatcherCommand::Shutdown).await;
    }
}

fn spawn_reload_loop(
    handle: Arc<CatalogHandle>,
    loader: LoaderConfig,
    scanner: ReportScanner,
    config: WatchConfig,
    mut event_rx: mpsc::Receiver<notify::Result<Event>>,
    mut command_rx: mpsc::Receiver<WatcherCommand>,
    update_tx: broadcast::Sender<ReloadUpdate>,
) {
    tokio::spawn(async move {
        let mut pending: Option<(time::Instant, String)> = None;

        loop {
            let deadline = pending.as_ref().map(|(deadline, _)| *deadline);

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    if touches_report(&scanner, event) {
                        let reason = pending
                            .take()
                            .map_or_else(|| FS_EVENT_REASON.to_string(), |(_, reason)| reason);
                        pending = Some((time::Instant::now() + config.debounce, reason));
                    }
                }
                Some(cmd) = command_rx.recv() => {
                    match cmd {
                        WatcherCommand::Trigger { reason } => {
                            pending = Some((time::Instant::now(), reason));
                        }
                        WatcherCommand::Shutdown => break,
                    }
                }
                () = async {
                    if let Some(deadline) = deadline {
                        time::sleep_until(deadline).await;
                    }
                }, if deadline.is_some() => {
                    let reason = pending
                        .take()
                        .map_or_else(|| FS_EVENT_REASON.to_string(), |(_, reason)| reason);
                    let update = reload_once(&handle, &loader, reason).await;
                    let _ = update_tx.send(update);
                }
                else => break,
            }
        }
        info!("Report watcher stopped");
    });
}

fn touches_report(scanner: &ReportScanner, event: notify::Result<Event>) -> bool {
    match event {
        Ok(event) => {
            if matches!(event.kind, EventKind::Access(_)) {
                return false;
            }
            event.paths.iter().any(|path| scanner.is_report_path(path))
        }
        Err(err) => {
            warn!("watch error: {err}");
            false
        }
    }
}

async fn reload_once(handle: &CatalogHandle, loader: &LoaderConfig, reason: String) -> ReloadUpdate {
    let started = Instant::now();
    let config = loader.clone();
    let outcome = tokio::task::spawn_blocking(move || load_catalog(&config)).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let mut update = ReloadUpdate {
        completed_at: SystemTime::now(),
        duration_ms,
        reason,
        success: false,
        records: None,
        error: None,
    };

    match outcome {
        Ok(Ok(catalog)) if catalog.load_status().is_loaded() => {
            let records = catalog.records().len();
            handle.replace(catalog);
            info!(
                "Reloaded report ({records} employees, {duration_ms} ms, reason={})",
                update.reason
            );
            update.success = true;
            update.records = Some(records);
        }
        Ok(Ok(catalog)) => {
            let message = format!("reload degraded: {:?}", catalog.load_status());
            warn!("{message}; keeping previous catalog");
            update.error = Some(message);
        }
        Ok(Err(err)) => {
            warn!("Reload failed: {err}; keeping previous catalog");
            update.error = Some(err.to_string());
        }
        Err(err) => {
            error!("Reload task panicked: {err}");
            update.error = Some(err.to_string());
        }
    }
    update
}
