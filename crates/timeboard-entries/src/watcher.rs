use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::scheduler::refresh;
use crate::store::EntryStore;

/// Reloads the store whenever the log file is created or modified.
///
/// The parent directory is watched rather than the file itself so that
/// exports which replace the file by rename are still noticed.
pub struct LogWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl LogWatcher {
    /// Start watching `path`. Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<EntryStore>, path: PathBuf) -> notify::Result<Self> {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| notify::Error::generic("log path has no file name"))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) if Self::touches(&event, &file_name) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "file watch error"),
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        info!("watching {} for changes", path.display());

        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Coalesce bursts of events from a single write.
                while rx.try_recv().is_ok() {}

                debug!("log file changed, reloading");
                if let Err(e) = refresh(&store, &path).await {
                    warn!(error = %e, "watch-triggered reload failed");
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            task,
        })
    }

    fn touches(event: &Event, file_name: &OsString) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
    }
}

impl Drop for LogWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

