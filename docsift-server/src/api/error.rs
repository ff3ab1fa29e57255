use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use docsift_core::JobFailure;
use docsift_types::SearchError;

/// A [`SearchError`] rendered as `{"error": {"code", "message"}, "search_id"?}`.
#[derive(Debug)]
pub struct ApiError {
    pub error: SearchError,
    pub search_id: Option<String>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_id: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::warn!("[API] {} -> {}", self.error.code(), self.error);
        }
        let body = ErrorBody {
            error: ErrorDetail { code: self.error.code(), message: self.error.to_string() },
            search_id: self.search_id.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(error: SearchError) -> Self {
        Self { error, search_id: None }
    }
}

impl From<JobFailure> for ApiError {
    fn from(failure: JobFailure) -> Self {
        Self { error: failure.error, search_id: failure.search_id }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        SearchError::invalid_request(rejection.body_text()).into()
    }
}
