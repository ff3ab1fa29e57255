//! In-memory progress map with TTL and capacity bounds.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use docsift_types::{ProgressConfig, ProgressSnapshot, SearchStatus};
use tokio::task::JoinHandle;
use tokio::time::interval;

use super::ProgressStore;

#[derive(Debug, Clone)]
struct ProgressRecord {
    status: SearchStatus,
    processed_chunks: u64,
    total_chunks: u64,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl ProgressRecord {
    fn new() -> Self {
        Self {
            status: SearchStatus::Initializing,
            processed_chunks: 0,
            total_chunks: 0,
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.finished_at.is_some_and(|at| at.elapsed() >= ttl)
    }
}

/// `DashMap`-backed [`ProgressStore`].
///
/// Terminal records are dropped once older than `ttl`; when the map is at
/// `max_entries` the oldest terminal records make room for new jobs. In-flight
/// records are never evicted, so the cap can be exceeded while every
/// tracked job is still running.
#[derive(Debug)]
pub struct ProgressTracker {
    records: DashMap<String, ProgressRecord>,
    ttl: Duration,
    max_entries: usize,
}

impl ProgressTracker {
    pub fn new(config: &ProgressConfig) -> Self {
        Self::with_limits(Duration::from_secs(config.ttl_secs), config.max_entries)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self { records: DashMap::new(), ttl, max_entries: max_entries.max(1) }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop terminal records older than the TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let before = self.records.len();
        let ttl = self.ttl;
        self.records.retain(|_, record| !record.is_expired(ttl));
        before.saturating_sub(self.records.len())
    }

    /// Make room for one more record.
    fn enforce_capacity(&self) {
        if self.records.len() < self.max_entries {
            return;
        }
        let expired = self.evict_expired();
        if expired > 0 {
            tracing::debug!("[Progress] Evicted {} expired record(s)", expired);
        }

        let excess = (self.records.len() + 1).saturating_sub(self.max_entries);
        if excess == 0 {
            return;
        }
        let mut finished: Vec<(String, Instant)> = self
            .records
            .iter()
            .filter_map(|entry| entry.finished_at.map(|at| (entry.key().clone(), at)))
            .collect();
        finished.sort_by_key(|(_, at)| *at);

        let evicted = finished
            .iter()
            .take(excess)
            .filter(|(id, _)| self.records.remove(id).is_some())
            .count();
        if evicted < excess {
            tracing::warn!(
                "[Progress] Capacity {} exceeded, {} record(s) still in flight",
                self.max_entries,
                self.records.len()
            );
        } else {
            tracing::debug!("[Progress] Evicted {} oldest finished record(s)", evicted);
        }
    }

    /// Periodically evict expired records until the tracker is dropped.
    pub fn start_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(tracker) = weak.upgrade() else {
                    break;
                };
                let removed = tracker.evict_expired();
                if removed > 0 {
                    tracing::debug!("[Progress] Sweeper removed {} expired record(s)", removed);
                }
                crate::metrics::update_progress_gauge(tracker.len());
            }
        });
        tracing::info!("[Progress] Sweeper started (interval: {}s)", every.as_secs());
        handle
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(&ProgressConfig::default())
    }
}

impl ProgressStore for ProgressTracker {
    fn start(&self, search_id: &str) {
        self.enforce_capacity();
        self.records.insert(search_id.to_string(), ProgressRecord::new());
    }

    fn set_total(&self, search_id: &str, total_chunks: u64) {
        if let Some(mut record) = self.records.get_mut(search_id) {
            if record.status == SearchStatus::Initializing {
                record.total_chunks = total_chunks;
                record.status = SearchStatus::Processing;
            }
        }
    }

    fn advance(&self, search_id: &str, count: u64) {
        if let Some(mut record) = self.records.get_mut(search_id) {
            if record.status.is_terminal() {
                return;
            }
            record.processed_chunks =
                record.processed_chunks.saturating_add(count).min(record.total_chunks);
        }
    }

    fn mark_status(&self, search_id: &str, status: SearchStatus) -> bool {
        let Some(mut record) = self.records.get_mut(search_id) else {
            return false;
        };
        if !record.status.can_transition_to(status) {
            return false;
        }
        record.status = status;
        if status.is_terminal() {
            record.finished_at = Some(Instant::now());
            tracing::debug!(
                "[Progress] {} -> {} after {:?}",
                search_id,
                status,
                record.started_at.elapsed()
            );
        }
        true
    }

    fn get(&self, search_id: &str) -> Option<ProgressSnapshot> {
        self.records.get(search_id).map(|record| ProgressSnapshot {
            search_id: search_id.to_string(),
            status: record.status,
            processed_chunks: record.processed_chunks,
            total_chunks: record.total_chunks,
        })
    }
}
