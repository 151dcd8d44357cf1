use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use timeboard_entries::{
    aggregate_by_day, aggregate_by_project, aggregate_by_week, filter_by_range, DayStat,
    ProjectStat, TimeEntry, WeekStat,
};

use super::{ApiError, AppState};
use crate::range::RangeParams;

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TimeEntry>>, ApiError> {
    let range = state.range(RangeParams::from_pairs(query))?;
    let snapshot = state.store.snapshot();

    Ok(Json(filter_by_range(snapshot.entries(), &range.from, &range.to)))
}

pub async fn get_projects(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ProjectStat>>, ApiError> {
    let range = state.range(RangeParams::from_pairs(query))?;
    let snapshot = state.store.snapshot();
    let entries = filter_by_range(snapshot.entries(), &range.from, &range.to);

    Ok(Json(aggregate_by_project(&entries)))
}

pub async fn get_days(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<DayStat>>, ApiError> {
    let range = state.range(RangeParams::from_pairs(query))?;
    let snapshot = state.store.snapshot();
    let entries = filter_by_range(snapshot.entries(), &range.from, &range.to);

    Ok(Json(aggregate_by_day(&entries, &range.from, &range.to)))
}

pub async fn get_weeks(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<WeekStat>>, ApiError> {
    let range = state.range(RangeParams::from_pairs(query))?;
    let snapshot = state.store.snapshot();
    let entries = filter_by_range(snapshot.entries(), &range.from, &range.to);

    Ok(Json(aggregate_by_week(&entries)))
}

/// Planned-vs-actual has no data source yet.
pub async fn planned_vs_actual() -> ApiError {
    ApiError::new(StatusCode::NOT_IMPLEMENTED, "not implemented")
}
