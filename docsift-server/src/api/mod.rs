//! API Routes
//!
//! REST endpoints mounted under `/api`.

mod error;
mod metrics;
mod search;


pub use error::ApiError;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        // Large search
        .route("/large-filesearch", post(search::large_filesearch))
        .route("/large-filesearch/:search_id/progress", get(search::get_progress))
        // Whole-file search
        .route("/filesearch", post(search::filesearch))
        // Prometheus metrics
        .route("/metrics", get(metrics::get_metrics))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": {"code": "not_found", "message": "Not found"}})),
    )
}

#[derive(Serialize)]
struct StatusResponse {
    version: String,
    model: String,
    tracked_searches: usize,
}

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config().upstream.model.clone(),
        tracked_searches: state.tracked_searches(),
    })
}
