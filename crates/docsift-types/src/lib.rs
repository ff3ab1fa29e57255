//! # docsift Types
//!
//! Core types, models, and error definitions for docsift.
//!
//! - **`error`** - Typed errors for the search pipeline and configuration
//! - **`models`** - Search job models, HTTP payloads and configuration
//! - **`protocol`** - Wire types for the hosted completion and indexing APIs
//!
//! ## Architecture Role
//!
//! `docsift-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        docsift-types (this crate)
//!                │
//!                ▼
//!          docsift-core
//!                │
//!                ▼
//!         docsift-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, SearchError};

pub use models::{
    DocsiftConfig, FileSearchRequest, FileSearchResponse, LargeSearchRequest,
    LargeSearchResponse, PipelineConfig, ProgressConfig, ProgressResponse, ProgressSnapshot,
    RetryConfig, SearchStatus, ServerConfig, UpstreamAuthMode, UpstreamConfig,
};
