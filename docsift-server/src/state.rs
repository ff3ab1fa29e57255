//! Application State
//!
//! Holds the loaded configuration, the process-wide progress tracker and
//! the search pipelines built on top of the upstream clients.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;

use docsift_core::upstream::{HttpCompletionClient, HttpIndexStore, UpstreamHttp};
use docsift_core::{
    CompletionService, FileSearch, IndexingStore, LargeSearch, ProgressStore, ProgressTracker,
    RetryPolicy,
};
use docsift_types::{DocsiftConfig, ProgressSnapshot};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: DocsiftConfig,
    pub progress: Arc<ProgressTracker>,
    pub large_search: LargeSearch,
    pub file_search: FileSearch,
}

impl AppState {
    /// Build state backed by the configured upstream service.
    pub fn new(config: DocsiftConfig) -> Result<Self> {
        let http = UpstreamHttp::new(&config.upstream)?;
        let store: Arc<dyn IndexingStore> = Arc::new(
            HttpIndexStore::new(http.clone(), &config.upstream)
                .with_retry(RetryPolicy::from(config.pipeline.retry)),
        );
        let completion: Arc<dyn CompletionService> =
            Arc::new(HttpCompletionClient::new(http, &config.upstream.model));
        Ok(Self::with_services(config, store, completion))
    }

    /// Build state around arbitrary collaborators.
    pub fn with_services(
        config: DocsiftConfig,
        store: Arc<dyn IndexingStore>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        let progress = Arc::new(ProgressTracker::new(&config.progress));
        let large_search = LargeSearch::new(
            progress.clone(),
            Arc::clone(&store),
            Arc::clone(&completion),
            config.pipeline.clone(),
        );
        let file_search = FileSearch::new(store, completion, &config.pipeline);
        Self { inner: Arc::new(AppStateInner { config, progress, large_search, file_search }) }
    }

    pub fn config(&self) -> &DocsiftConfig {
        &self.inner.config
    }

    pub fn progress_snapshot(&self, search_id: &str) -> Option<ProgressSnapshot> {
        self.inner.progress.get(search_id)
    }

    pub fn tracked_searches(&self) -> usize {
        self.inner.progress.len()
    }

    /// Start the progress sweeper. Stops on its own once the state is dropped.
    pub fn start_background_tasks(&self) -> JoinHandle<()> {
        self.inner
            .progress
            .start_sweeper(Duration::from_secs(self.inner.config.progress.sweep_interval_secs))
    }
}
