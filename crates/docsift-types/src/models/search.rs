//! Search job state and the HTTP payloads built around it.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 1 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Lifecycle of a large search job.
///
/// Transitions only move forward. `Failed` is reachable from any
/// non-terminal state; `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Initializing,
    Processing,
    Completed,
    Failed,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether moving from `self` to `next` respects the lifecycle.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Initializing, Self::Processing) => true,
            (Self::Processing, Self::Completed) => true,
            (current, Self::Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round a percentage to two decimals.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Point-in-time copy of a job's progress record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub search_id: String,
    pub status: SearchStatus,
    pub processed_chunks: u64,
    pub total_chunks: u64,
}

impl ProgressSnapshot {
    /// `processed / total * 100`, two decimals, `0` while the total is unknown or zero.
    pub fn percentage(&self) -> f64 {
        if self.total_chunks == 0 {
            return 0.0;
        }
        round_percentage(self.processed_chunks as f64 / self.total_chunks as f64 * 100.0)
    }
}

/// Body of `POST /api/large-filesearch`.
///
/// Omitted tuning fields fall back to the server's pipeline defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct LargeSearchRequest {
    #[validate(length(min = 1_u64))]
    pub query: String,
    pub file_paths: Vec<String>,
    #[validate(range(min = 1_u32, max = 50_u32))]
    #[serde(default)]
    pub max_results: Option<u32>,
    #[validate(range(min = 1_u64))]
    #[serde(default)]
    pub chunk_size: Option<u64>,
    #[validate(range(min = 1_usize))]
    #[serde(default)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LargeSearchResponse {
    pub search_id: String,
    pub status: SearchStatus,
    pub response: String,
}

/// Body of `GET /api/large-filesearch/:search_id/progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressResponse {
    pub search_id: String,
    pub status: SearchStatus,
    pub progress_percentage: f64,
    pub processed_chunks: u64,
    pub total_chunks: u64,
}

impl From<&ProgressSnapshot> for ProgressResponse {
    fn from(snapshot: &ProgressSnapshot) -> Self {
        Self {
            search_id: snapshot.search_id.clone(),
            status: snapshot.status,
            progress_percentage: snapshot.percentage(),
            processed_chunks: snapshot.processed_chunks,
            total_chunks: snapshot.total_chunks,
        }
    }
}

/// Body of `POST /api/filesearch`: whole files, one batch, one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct FileSearchRequest {
    #[validate(length(min = 1_u64))]
    pub query: String,
    #[validate(length(min = 1_u64))]
    pub file_paths: Vec<String>,
    #[validate(range(min = 1_u32, max = 50_u32))]
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSearchResponse {
    pub response: String,
}
