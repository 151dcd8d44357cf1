use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use timeboard_entries::scheduler::hours;
use timeboard_entries::{refresh, EntryStore, LogWatcher, RefreshScheduler};

use crate::api::{self, AppState};
use crate::config::Config;

pub async fn handle_serve_command(config: Config) -> Result<()> {
    let store = Arc::new(EntryStore::new());

    // A missing export at startup is not fatal; POST /refresh once it exists.
    if let Err(e) = refresh(&store, &config.jsonl_path).await {
        warn!(error = %e, "initial load failed");
        info!("export time entries to JSONL, then POST /refresh");
    }

    let scheduler = RefreshScheduler::spawn(
        Arc::clone(&store),
        config.jsonl_path.clone(),
        hours(config.poll_interval_hours),
    );

    let watcher = if config.watch && !config.jsonl_path.as_os_str().is_empty() {
        match LogWatcher::spawn(Arc::clone(&store), config.jsonl_path.clone()) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!(error = %e, "file watching disabled");
                None
            }
        }
    } else {
        None
    };

    let state = AppState::new(store, config.jsonl_path.clone(), config.tz());
    let router = api::create_router(state, &config.frontend_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server to {}", addr))?;

    info!("listening on http://localhost:{}", config.port);
    info!(
        jsonl = %config.jsonl_path.display(),
        timezone = %config.timezone,
        poll_hours = config.poll_interval_hours,
        watch = watcher.is_some(),
        frontend = %config.frontend_dir.display(),
        "configuration"
    );

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(scheduler) = scheduler {
        scheduler.stop();
    }
    drop(watcher);

    result.context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
