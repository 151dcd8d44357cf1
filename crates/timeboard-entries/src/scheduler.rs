use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::error::LoadError;
use crate::store::EntryStore;

/// Reload `path` into `store` on tokio's blocking pool.
///
/// This is the only reload path: the HTTP refresh endpoint, the periodic
/// scheduler and the file watcher all go through it.
pub async fn refresh(store: &Arc<EntryStore>, path: &Path) -> Result<usize, LoadError> {
    let store = Arc::clone(store);
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || store.load(&path))
        .await
        .map_err(|e| LoadError::Join(e.to_string()))?
}

/// Whole hours as a `Duration`.
pub fn hours(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(3600))
}

/// Background task that reloads the log on a fixed interval.
///
/// Failed reloads are logged and the next tick fires regardless. The task
/// is aborted when the scheduler is dropped.
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Start the loop. Returns `None` (and runs nothing) when `every` is zero
    /// or `path` is empty.
    pub fn spawn(store: Arc<EntryStore>, path: PathBuf, every: Duration) -> Option<Self> {
        if every.is_zero() || path.as_os_str().is_empty() {
            return None;
        }

        info!(interval_secs = every.as_secs(), "starting refresh scheduler for {}", path.display());

        let handle = tokio::spawn(async move {
            let mut timer = interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // The first tick completes immediately.
            timer.tick().await;

            loop {
                timer.tick().await;
                if let Err(e) = refresh(&store, &path).await {
                    warn!(error = %e, "scheduled reload failed");
                }
            }
        });

        Some(Self { handle })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
