use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use farewatch_shared::{latest_per_route, RouteResult};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub last_updated: Option<DateTime<Utc>>,
    pub routes: Vec<RouteResult>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/latest", get(latest))
        .route("/api/latest/{route}", get(latest_for_route))
        .route("/api/snapshots", get(all_snapshots))
}

async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = state.snapshots.load_all().await?;
    debug!(records = records.len(), "Rendering dashboard");
    Ok(Html(render::dashboard_page(&latest_per_route(&records))))
}

async fn latest(State(state): State<AppState>) -> Result<Json<LatestResponse>, AppError> {
    let records = state.snapshots.load_all().await?;
    let latest = latest_per_route(&records);

    Ok(Json(LatestResponse {
        last_updated: latest.last_updated,
        routes: latest.routes.into_iter().cloned().collect(),
    }))
}

async fn latest_for_route(
    State(state): State<AppState>,
    Path(route): Path<String>,
) -> Result<Json<RouteResult>, AppError> {
    let records = state.snapshots.load_all().await?;

    latest_per_route(&records)
        .routes
        .into_iter()
        .find(|r| r.route_name == route)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("No snapshots for route '{}'", route)))
}

async fn all_snapshots(State(state): State<AppState>) -> Result<Json<Vec<RouteResult>>, AppError> {
    Ok(Json(state.snapshots.load_all().await?))
}
