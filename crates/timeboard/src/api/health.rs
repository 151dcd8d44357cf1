use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::SecondsFormat;
use serde::Serialize;
use tracing::error;

use timeboard_entries::refresh as reload;

use super::{ApiError, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub entries: usize,
    /// RFC 3339, or `null` before the first successful load.
    pub last_loaded: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub ok: bool,
    pub entries: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.snapshot();

    Json(HealthResponse {
        status: "ok",
        entries: snapshot.len(),
        last_loaded: snapshot
            .last_loaded()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
    })
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, ApiError> {
    let entries = reload(&state.store, &state.jsonl_path).await.map_err(|e| {
        error!(error = %e, "refresh failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(RefreshResponse { ok: true, entries }))
}
