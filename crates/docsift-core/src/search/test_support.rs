//! In-memory collaborators for pipeline tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use docsift_types::protocol::Usage;
use docsift_types::{ProgressSnapshot, SearchStatus};

use crate::chunker::Batch;
use crate::error::{UpstreamError, UpstreamResult};
use crate::progress::{ProgressStore, ProgressTracker};
use crate::upstream::{
    BatchAck, CompletionRequest, CompletionResponse, CompletionService, IndexingStore, StoreId,
};

/// Answers per-batch queries from a script, then everything else with
/// `summary`. Requests are recorded.
pub(crate) struct FakeCompletion {
    answers: Mutex<VecDeque<UpstreamResult<String>>>,
    summary: String,
    summary_error: Mutex<Option<UpstreamError>>,
    pub(crate) requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub(crate) fn new(answers: Vec<&str>, summary: &str) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| Ok(a.to_string())).collect()),
            summary: summary.to_string(),
            summary_error: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The first summarization call fails with `error`.
    pub(crate) fn with_failing_summary(self, error: UpstreamError) -> Self {
        *self.summary_error.lock().unwrap() = Some(error);
        self
    }

    pub(crate) fn failing_query(error: UpstreamError) -> Self {
        let fake = Self::new(Vec::new(), "unused");
        fake.answers.lock().unwrap().push_back(Err(error));
        fake
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests without tools, i.e. summarization calls.
    pub(crate) fn summary_requests(&self) -> Vec<CompletionRequest> {
        self.requests().into_iter().filter(|r| r.tools.is_empty()).collect()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, request: CompletionRequest) -> UpstreamResult<CompletionResponse> {
        let is_query = !request.tools.is_empty();
        self.requests.lock().unwrap().push(request);
        let text = if is_query {
            self.answers.lock().unwrap().pop_front().unwrap_or_else(|| Ok(String::new()))?
        } else if let Some(error) = self.summary_error.lock().unwrap().take() {
            return Err(error);
        } else {
            self.summary.clone()
        };
        Ok(CompletionResponse {
            id: "resp_fake".to_string(),
            text,
            status: "completed".to_string(),
            usage: Usage::default(),
        })
    }
}

/// Store that records every call. `fail_upload_at` makes the n-th upload
/// (0-based) fail permanently; `upload_delay` slows every upload down.
#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) created: AtomicUsize,
    pub(crate) deleted: AtomicUsize,
    pub(crate) uploads: Mutex<Vec<(String, usize)>>,
    pub(crate) fail_upload_at: Option<usize>,
    pub(crate) fail_create: bool,
    pub(crate) fail_delete: bool,
    pub(crate) upload_delay: Duration,
}

impl FakeStore {
    pub(crate) fn deleted(&self) -> usize {
        self.deleted.load(Ordering::SeqCst)
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl IndexingStore for FakeStore {
    async fn create_store(&self, _name: &str) -> UpstreamResult<StoreId> {
        if self.fail_create {
            return Err(UpstreamError::status(401, "invalid api key"));
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        Ok(StoreId::new(format!("vs_{}", n)))
    }

    async fn upload_batch(&self, store: &StoreId, batch: &Batch) -> UpstreamResult<BatchAck> {
        if !self.upload_delay.is_zero() {
            tokio::time::sleep(self.upload_delay).await;
        }
        let mut uploads = self.uploads.lock().unwrap();
        if self.fail_upload_at == Some(uploads.len()) {
            return Err(UpstreamError::Rejected("file batch ended with status Failed".to_string()));
        }
        uploads.push((store.to_string(), batch.len()));
        Ok(BatchAck {
            batch_id: format!("vsfb_{}", uploads.len()),
            file_ids: (0..batch.len()).map(|i| format!("file_{}", i)).collect(),
            indexed_files: batch.len() as u64,
        })
    }

    async fn delete_store(&self, _store: &StoreId) -> UpstreamResult<()> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(UpstreamError::status(500, "delete failed"));
        }
        Ok(())
    }
}

/// Tracker that keeps every snapshot observed after an `advance`.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) inner: ProgressTracker,
    pub(crate) history: Mutex<Vec<ProgressSnapshot>>,
}

impl RecordingProgress {
    pub(crate) fn percentages(&self) -> Vec<f64> {
        self.history.lock().unwrap().iter().map(ProgressSnapshot::percentage).collect()
    }
}

impl ProgressStore for RecordingProgress {
    fn start(&self, search_id: &str) {
        self.inner.start(search_id);
    }

    fn set_total(&self, search_id: &str, total_chunks: u64) {
        self.inner.set_total(search_id, total_chunks);
    }

    fn advance(&self, search_id: &str, count: u64) {
        self.inner.advance(search_id, count);
        if let Some(snapshot) = self.inner.get(search_id) {
            self.history.lock().unwrap().push(snapshot);
        }
    }

    fn mark_status(&self, search_id: &str, status: SearchStatus) -> bool {
        self.inner.mark_status(search_id, status)
    }

    fn get(&self, search_id: &str) -> Option<ProgressSnapshot> {
        self.inner.get(search_id)
    }
}
