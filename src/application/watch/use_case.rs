//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::events::SyncEvent;
use crate::application::reconcile::ReconcileUseCase;
use crate::domain::ports::{ComposeRepository, ContainerRuntime, RegistryRepository};
use crate::error::{RegsyncError, RegsyncResult};

use super::event::{content_hash, WatchOptions, WatcherState};

/// How long one poll of the event channel blocks
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watch Use Case
///
/// Owns the file watch handle and debounce state for the lifetime of the
/// `regsync watch` command. Passes run on the calling thread, so they never
/// overlap; events that arrive during a pass are merged into one follow-up pass.
pub struct WatchUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    options: WatchOptions,
    reconcile: ReconcileUseCase<RR, CR, RT>,
}

impl<RR, CR, RT> WatchUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    pub fn new(options: WatchOptions, reconcile: ReconcileUseCase<RR, CR, RT>) -> Self {
        Self { options, reconcile }
    }

    /// Start watching (blocking)
    ///
    /// This method blocks until the running flag is set to false.
    /// Use the callback to receive events.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> RegsyncResult<()>
    where
        F: Fn(SyncEvent),
    {
        let registry = self.options.registry.clone();
        on_event(SyncEvent::WatchStarted {
            registry: registry.display().to_string(),
            compose: self.options.compose.display().to_string(),
        });

        // Content at startup counts as reconciled unless asked otherwise
        let mut last_hash = content_hash(&registry);
        if self.options.reconcile_on_start && !self.settled_pass(&on_event) {
            last_hash = None;
        }

        let (tx, rx) = channel();
        let options = self.options.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    for path in event.paths {
                        if options.is_registry_path(&path) {
                            let _ = tx.send(Ok(path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e.to_string()));
                }
            },
            Config::default(),
        )
        .map_err(|e| self.watch_error(e))?;

        // The parent directory survives editors that replace the file by rename
        watcher
            .watch(self.options.watch_dir(), RecursiveMode::NonRecursive)
            .map_err(|e| self.watch_error(e))?;

        let mut state = WatcherState::new(self.options.debounce);

        while running.load(Ordering::SeqCst) {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(path)) => state.add_change(path),
                Ok(Err(message)) => on_event(SyncEvent::Error { message }),
                Err(_) => {}
            }

            if !state.should_sync() {
                continue;
            }
            state.take_changes();

            let hash = match content_hash(&registry) {
                Some(hash) => hash,
                None => {
                    tracing::debug!(path = %registry.display(), "registry missing, pass skipped");
                    continue;
                }
            };
            if last_hash.as_deref() == Some(hash.as_str()) {
                tracing::debug!("registry content unchanged, pass skipped");
                continue;
            }

            on_event(SyncEvent::RegistryChanged {
                path: registry.display().to_string(),
            });
            // Skips and failures are retried on the next save, even with identical content
            last_hash = self.settled_pass(&on_event).then_some(hash);
        }

        drop(watcher);
        on_event(SyncEvent::Shutdown);
        Ok(())
    }

    /// Run one pass; false when it aborted or left services skipped or failed
    fn settled_pass<F>(&self, on_event: &F) -> bool
    where
        F: Fn(SyncEvent),
    {
        match self.reconcile.run_pass(on_event) {
            Ok(result) if result.is_settled() => true,
            Ok(result) => {
                tracing::info!(
                    skipped = result.skipped.len(),
                    failed = result.failed.len(),
                    "services left for the next registry change"
                );
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "pass aborted, waiting for the next change");
                false
            }
        }
    }

    fn watch_error(&self, e: notify::Error) -> RegsyncError {
        RegsyncError::Watch {
            path: self.options.watch_dir().to_path_buf(),
            message: e.to_string(),
        }
    }
}
