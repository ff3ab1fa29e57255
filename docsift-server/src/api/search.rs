use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use tracing::info;

use docsift_types::{
    FileSearchRequest, FileSearchResponse, LargeSearchRequest, LargeSearchResponse,
    ProgressResponse, SearchError,
};

use super::ApiError;
use crate::state::AppState;

/// Runs the whole pipeline before responding; poll progress from another
/// connection with the returned id. The job keeps running if the client
/// goes away.
pub async fn large_filesearch(
    State(state): State<AppState>,
    payload: Result<Json<LargeSearchRequest>, JsonRejection>,
) -> Result<Json<LargeSearchResponse>, ApiError> {
    let Json(request) = payload?;
    info!(
        "[API] large-filesearch: {} file(s), query_len={}",
        request.file_paths.len(),
        request.query.len()
    );
    let response = state.inner.large_search.run_detached(&request).await?;
    Ok(Json(response))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let snapshot = state
        .progress_snapshot(&search_id)
        .ok_or_else(|| SearchError::NotFound { search_id: search_id.clone() })?;
    Ok(Json(ProgressResponse::from(&snapshot)))
}

pub async fn filesearch(
    State(state): State<AppState>,
    payload: Result<Json<FileSearchRequest>, JsonRejection>,
) -> Result<Json<FileSearchResponse>, ApiError> {
    let Json(request) = payload?;
    info!("[API] filesearch: {} file(s)", request.file_paths.len());
    let response = state.inner.file_search.run_detached(request).await?;
    Ok(Json(response))
}
