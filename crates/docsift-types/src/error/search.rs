//! Search pipeline errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can end a search job or a progress lookup.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SearchError {
    /// Request parameters are unusable (zero chunk size, empty query, ...)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Input file could not be opened, stat'ed or read
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// Indexing store unreachable, upload rejected or batch failed to index
    #[error("Indexing error: {message}")]
    Indexing { message: String },

    /// Per-batch query or final summarization failed
    #[error("Completion service error: {message}")]
    CompletionService { message: String },

    /// No progress record for the given search id
    #[error("Search ID not found: {search_id}")]
    NotFound { search_id: String },

    /// Internal error (bugs, unexpected states)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SearchError {
    /// Stable error code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Io { .. } => "io_error",
            Self::Indexing { .. } => "indexing_error",
            Self::CompletionService { .. } => "completion_service_error",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::Io { .. } => 422,
            Self::Indexing { .. } | Self::CompletionService { .. } => 502,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::Io { .. } | Self::NotFound { .. })
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into() }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io { path: path.into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(SearchError::invalid_request("bad").http_status_code(), 400);
        assert_eq!(
            SearchError::NotFound { search_id: "x".to_string() }.http_status_code(),
            404
        );
        assert_eq!(
            SearchError::Indexing { message: "store down".to_string() }.http_status_code(),
            502
        );
        assert_eq!(
            SearchError::CompletionService { message: "timeout".to_string() }.http_status_code(),
            502
        );
    }

    #[test]
    fn test_codes_are_distinct_per_kind() {
        let errors = [
            SearchError::invalid_request("a"),
            SearchError::Io { path: "p".to_string(), message: "m".to_string() },
            SearchError::Indexing { message: "m".to_string() },
            SearchError::CompletionService { message: "m".to_string() },
            SearchError::NotFound { search_id: "s".to_string() },
            SearchError::Internal { message: "m".to_string() },
        ];
        let mut codes: Vec<&str> = errors.iter().map(SearchError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_io_helper_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = SearchError::io("/tmp/a.bin", &io_err);
        assert!(err.is_client_error());
        assert_eq!(err.code(), "io_error");
        assert!(err.to_string().contains("/tmp/a.bin"));
    }
}
