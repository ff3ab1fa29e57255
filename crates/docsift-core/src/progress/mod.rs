//! Job progress tracking.

mod tracker;

#[cfg(test)]
mod tracker_tests;

pub use tracker::ProgressTracker;

use docsift_types::{ProgressSnapshot, SearchStatus};

/// Process-wide progress state, keyed by search id.
///
/// One writer per id (the job), many readers (progress polls). Every
/// mutation on an unknown id is a no-op.
pub trait ProgressStore: Send + Sync {
    /// Create a fresh `initializing` record with zero counters.
    fn start(&self, search_id: &str);

    /// Fix the total and move to `processing`. Ignored unless the record
    /// is still initializing.
    fn set_total(&self, search_id: &str, total_chunks: u64);

    /// Add `count` processed chunks, clamped at the total.
    fn advance(&self, search_id: &str, count: u64);

    /// Move to `status` when the lifecycle allows it. Returns whether the
    /// record changed.
    fn mark_status(&self, search_id: &str, status: SearchStatus) -> bool;

    fn get(&self, search_id: &str) -> Option<ProgressSnapshot>;
}
