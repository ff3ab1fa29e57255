//! Test helpers for docsift-server unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Semaphore;

use docsift_core::{
    Batch, BatchAck, CompletionRequest, CompletionResponse, CompletionService, IndexingStore,
    StoreId, UpstreamError, UpstreamResult,
};
use docsift_types::protocol::Usage;
use docsift_types::DocsiftConfig;

use crate::state::AppState;

/// Answers file-search queries with `"fragment"` and summaries with `"summary"`.
#[derive(Default)]
pub struct StubCompletion {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, request: CompletionRequest) -> UpstreamResult<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = if request.tools.is_empty() { "summary" } else { "fragment" };
        Ok(CompletionResponse {
            id: "resp_stub".to_string(),
            text: text.to_string(),
            status: "completed".to_string(),
            usage: Usage::default(),
        })
    }
}

/// Indexes everything instantly, or rejects every upload when `reject_uploads`.
/// With a `gate`, each upload first waits for one permit.
#[derive(Default)]
pub struct StubStore {
    pub reject_uploads: bool,
    pub gate: Option<Arc<Semaphore>>,
    pub store_names: Mutex<Vec<String>>,
    pub deleted: AtomicUsize,
}

impl StubStore {
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (Arc::new(Self { gate: Some(gate.clone()), ..Self::default() }), gate)
    }

    /// Search id taken from the most recent `Large Search Documents {id}` store.
    pub fn last_search_id(&self) -> Option<String> {
        self.store_names
            .lock()
            .expect("store names lock")
            .last()
            .and_then(|name| name.strip_prefix("Large Search Documents "))
            .map(str::to_string)
    }
}

#[async_trait]
impl IndexingStore for StubStore {
    async fn create_store(&self, name: &str) -> UpstreamResult<StoreId> {
        self.store_names.lock().expect("store names lock").push(name.to_string());
        Ok(StoreId::new("vs_stub"))
    }

    async fn upload_batch(&self, _store: &StoreId, batch: &Batch) -> UpstreamResult<BatchAck> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }
        if self.reject_uploads {
            return Err(UpstreamError::Rejected("file batch failed".to_string()));
        }
        Ok(BatchAck {
            batch_id: "vsfb_stub".to_string(),
            file_ids: Vec::new(),
            indexed_files: batch.len() as u64,
        })
    }

    async fn delete_store(&self, _store: &StoreId) -> UpstreamResult<()> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_config() -> DocsiftConfig {
    let mut config = DocsiftConfig::default();
    config.pipeline.retry.max_attempts = 1;
    config
}

/// Create a minimal `AppState` over stub collaborators.
///
/// Returns `(AppState, TempDir)`. Keep `TempDir` alive for the test duration.
pub fn test_app_state_with(store: Arc<StubStore>) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let state =
        AppState::with_services(test_config(), store, Arc::new(StubCompletion::default()));
    (state, temp_dir)
}

pub fn test_app_state() -> (AppState, TempDir) {
    test_app_state_with(Arc::new(StubStore::default()))
}

/// Write `len` bytes into `dir/name` and return the path as a string.
pub fn write_fixture(dir: &TempDir, name: &str, len: usize) -> String {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, vec![b'z'; len]).expect("failed to write fixture");
    path.display().to_string()
}
