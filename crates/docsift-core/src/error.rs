//! Errors raised while talking to the hosted completion and indexing services.

use docsift_types::SearchError;
use thiserror::Error;

/// Longest upstream error body kept in messages.
const MAX_ERROR_BODY: usize = 512;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamError {
    /// Request never produced a response (connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// Gave up waiting for an asynchronous upstream operation.
    #[error("Timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    /// Upstream accepted the call but reported the work as failed.
    #[error("Upstream rejected the request: {0}")]
    Rejected(String),

    /// Client-side misconfiguration (bad endpoint URL, header value).
    #[error("Invalid upstream configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    pub(crate) fn status(status: u16, body: &str) -> Self {
        let body = if body.len() > MAX_ERROR_BODY {
            let mut end = MAX_ERROR_BODY;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &body[..end])
        } else {
            body.to_string()
        };
        Self::Status { status, body }
    }

    /// Whether the same call may succeed if repeated.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Decode(_) | Self::Timeout { .. } | Self::Rejected(_) | Self::Config(_) => false,
        }
    }

    pub fn into_indexing(self) -> SearchError {
        SearchError::Indexing { message: self.to_string() }
    }

    pub fn into_completion(self) -> SearchError {
        SearchError::CompletionService { message: self.to_string() }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
