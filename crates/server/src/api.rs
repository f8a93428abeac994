use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

// ── Root & health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub jobs: usize,
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello, World!",
        jobs: state.registry.jobs_count(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: i64,
    pub tick_ms: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
        tick_ms: state.config.scheduler.tick_interval_ms,
    })
}

// ── Jobs ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<String>,
    pub count: usize,
}

pub async fn jobs_list(State(state): State<Arc<AppState>>) -> Json<JobsResponse> {
    // Registry order is unspecified; sort for stable output.
    let mut jobs = state.registry.list_jobs();
    jobs.sort();
    let count = jobs.len();
    Json(JobsResponse { jobs, count })
}

#[derive(Serialize)]
pub struct RemoveResponse {
    pub removed: String,
    pub count: usize,
}

/// Remove a named job. Removal is idempotent, so this always answers 200;
/// an unknown name is a warned no-op in the registry.
pub async fn jobs_remove(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<RemoveResponse> {
    state.registry.remove(&name);
    Json(RemoveResponse {
        removed: name,
        count: state.registry.jobs_count(),
    })
}
