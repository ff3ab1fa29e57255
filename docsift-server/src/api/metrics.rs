use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

pub async fn get_metrics(State(state): State<AppState>) -> Response {
    docsift_core::metrics::update_progress_gauge(state.tracked_searches());
    docsift_core::metrics::update_uptime_gauge();
    let metrics = docsift_core::metrics::render_metrics();

    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")], metrics).into_response()
}
