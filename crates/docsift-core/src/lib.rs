//! # docsift Core
//!
//! Core logic behind the docsift gateway.
//!
//! ```text
//! docsift-core/src/
//! ├── chunker.rs     # byte chunks and per-file batches
//! ├── progress/      # job id -> progress record, bounded
//! ├── upstream/      # completion + indexing store clients
//! ├── search/        # indexer, query engine, aggregator, orchestrator
//! ├── retry.rs       # bounded exponential backoff
//! ├── config.rs      # config file + env overrides
//! └── metrics.rs     # prometheus recorder
//! ```

#![allow(
    clippy::significant_drop_tightening,
    reason = "DashMap guards are scoped explicitly in the progress tracker"
)]
#![cfg_attr(test, allow(clippy::panic, clippy::float_cmp, clippy::unwrap_used))]

pub mod chunker;
pub mod config;
pub mod error;
pub mod metrics;
pub mod progress;
pub mod retry;
pub mod search;
pub mod upstream;

pub use chunker::{chunk_count, Batch, ChunkReader, Chunker};
pub use error::{UpstreamError, UpstreamResult};
pub use progress::{ProgressStore, ProgressTracker};
pub use retry::RetryPolicy;
pub use search::{FileSearch, JobFailure, LargeSearch, SearchParams};
pub use upstream::{
    BatchAck, CompletionRequest, CompletionResponse, CompletionService, IndexingStore, StoreId,
};
