mod health;
mod stats;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use timeboard_entries::EntryStore;

use crate::range::{today_in, DateRange, RangeParams};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntryStore>,
    pub jsonl_path: Arc<PathBuf>,
    pub tz: Tz,
    /// Pins "today" for default ranges; `None` means the real clock.
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Arc<EntryStore>, jsonl_path: PathBuf, tz: Tz) -> Self {
        Self {
            store,
            jsonl_path: Arc::new(jsonl_path),
            tz,
            today: None,
        }
    }

    fn range(&self, params: RangeParams) -> Result<DateRange, ApiError> {
        let today = self.today.unwrap_or_else(|| today_in(self.tz));
        DateRange::resolve(params, today).map_err(|msg| ApiError::new(StatusCode::BAD_REQUEST, msg))
    }
}

/// An error rendered as `{"error": "..."}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn create_router(state: AppState, frontend_dir: &Path) -> Router {
    let spa = ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .route("/health", get(health::health))
        .route("/refresh", post(health::refresh))
        .route("/api/entries", get(stats::list_entries))
        .route("/api/projects", get(stats::get_projects))
        .route("/api/days", get(stats::get_days))
        .route("/api/weeks", get(stats::get_weeks))
        .route("/api/planned-vs-actual", get(stats::planned_vs_actual))
        .fallback_service(spa)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
