//! The large-document search pipeline.
//!
//! ```text
//! LargeSearch::run_detached        spawned; caller disconnects do not cancel
//!   ├─ StoreLease::acquire          create store
//!   ├─ Chunker::total_chunks        metadata only
//!   ├─ per file, per batch
//!   │    ├─ BatchIndexer::index     upload + wait (requests retried by the store)
//!   │    ├─ ProgressStore::advance
//!   │    └─ QueryEngine::query ──▶ FragmentCollector::offer
//!   ├─ StoreLease::release          delete store, every exit path
//!   └─ Aggregator::summarize        one completion call (retried)
//! ```

mod aggregator;
mod indexer;
mod lease;
mod orchestrator;
mod params;
mod query;
mod quick;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::{summary_prompt, Aggregator};
pub use indexer::BatchIndexer;
pub use lease::StoreLease;
pub use orchestrator::{JobFailure, LargeSearch};
pub use params::SearchParams;
pub use query::{FragmentCollector, QueryEngine};
pub use quick::FileSearch;
