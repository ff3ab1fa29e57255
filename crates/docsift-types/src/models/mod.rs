//! Core domain models for docsift.

mod config;
mod search;

pub use config::{
    DocsiftConfig, PipelineConfig, ProgressConfig, RetryConfig, ServerConfig, UpstreamAuthMode,
    UpstreamConfig,
};
pub use search::{
    round_percentage, FileSearchRequest, FileSearchResponse, LargeSearchRequest,
    LargeSearchResponse, ProgressResponse, ProgressSnapshot, SearchStatus, DEFAULT_BATCH_SIZE,
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RESULTS,
};
