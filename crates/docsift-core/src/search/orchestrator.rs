use std::sync::Arc;
use std::time::Instant;

use docsift_types::{
    LargeSearchRequest, LargeSearchResponse, PipelineConfig, SearchError, SearchStatus,
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::aggregator::Aggregator;
use super::indexer::BatchIndexer;
use super::lease::StoreLease;
use super::params::SearchParams;
use super::query::{FragmentCollector, QueryEngine};
use crate::progress::ProgressStore;
use crate::retry::RetryPolicy;
use crate::upstream::{CompletionService, IndexingStore, StoreId};

/// A job that did not produce an answer.
///
/// `search_id` is `None` only when the request was rejected before a job
/// was created.
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct JobFailure {
    pub search_id: Option<String>,
    pub error: SearchError,
}

impl JobFailure {
    fn rejected(error: SearchError) -> Self {
        Self { search_id: None, error }
    }
}

/// Drives one large search from store creation to the final summary.
#[derive(Clone)]
pub struct LargeSearch {
    progress: Arc<dyn ProgressStore>,
    store: Arc<dyn IndexingStore>,
    completion: Arc<dyn CompletionService>,
    pipeline: PipelineConfig,
    retry: RetryPolicy,
}

impl LargeSearch {
    pub fn new(
        progress: Arc<dyn ProgressStore>,
        store: Arc<dyn IndexingStore>,
        completion: Arc<dyn CompletionService>,
        pipeline: PipelineConfig,
    ) -> Self {
        let retry = RetryPolicy::from(pipeline.retry);
        Self { progress, store, completion, pipeline, retry }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn progress(&self) -> &Arc<dyn ProgressStore> {
        &self.progress
    }

    /// Validate `request`, allocate a fresh search id and run to completion.
    pub async fn run(&self, request: &LargeSearchRequest) -> Result<LargeSearchResponse, JobFailure> {
        let params = SearchParams::resolve(request, &self.pipeline).map_err(JobFailure::rejected)?;
        self.run_with_id(Uuid::new_v4().to_string(), params).await
    }

    /// Like [`run`](Self::run), but the job executes on its own task.
    ///
    /// Dropping the returned future only stops waiting; the job still runs
    /// to completion or failure.
    pub async fn run_detached(
        &self,
        request: &LargeSearchRequest,
    ) -> Result<LargeSearchResponse, JobFailure> {
        let params = SearchParams::resolve(request, &self.pipeline).map_err(JobFailure::rejected)?;
        let search_id = Uuid::new_v4().to_string();

        let job = self.clone();
        let job_id = search_id.clone();
        match tokio::spawn(async move { job.run_with_id(job_id, params).await }).await {
            Ok(result) => result,
            Err(join_err) => {
                self.progress.mark_status(&search_id, SearchStatus::Failed);
                error!("[LargeSearch] {} task ended abnormally: {}", search_id, join_err);
                Err(JobFailure {
                    search_id: Some(search_id),
                    error: SearchError::Internal {
                        message: format!("search task ended abnormally: {}", join_err),
                    },
                })
            },
        }
    }

    pub async fn run_with_id(
        &self,
        search_id: String,
        params: SearchParams,
    ) -> Result<LargeSearchResponse, JobFailure> {
        let started = Instant::now();
        self.progress.start(&search_id);
        info!(
            "[LargeSearch] {} started: {} file(s), chunk_size={}, batch_size={}",
            search_id,
            params.file_paths.len(),
            params.chunker.chunk_size(),
            params.chunker.batch_size()
        );

        let outcome = {
            let guard = UnfinishedJobGuard::new(self.progress.as_ref(), &search_id);
            let outcome = self.execute(&search_id, &params).await;
            guard.disarm();
            outcome
        };

        match outcome {
            Ok(response) => {
                info!("[LargeSearch] {} completed in {:?}", search_id, started.elapsed());
                crate::metrics::record_job(SearchStatus::Completed.as_str(), started.elapsed());
                Ok(LargeSearchResponse { search_id, status: SearchStatus::Completed, response })
            },
            Err(err) => {
                self.progress.mark_status(&search_id, SearchStatus::Failed);
                error!("[LargeSearch] {} failed: {}", search_id, err);
                crate::metrics::record_job(SearchStatus::Failed.as_str(), started.elapsed());
                Err(JobFailure { search_id: Some(search_id), error: err })
            },
        }
    }

    async fn execute(&self, search_id: &str, params: &SearchParams) -> Result<String, SearchError> {
        let lease = StoreLease::acquire(
            Arc::clone(&self.store),
            &format!("Large Search Documents {}", search_id),
        )
        .await
        .map_err(|e| e.into_indexing())?;

        let outcome = self.index_and_query(search_id, params, lease.id()).await;
        let released = lease.release().await;

        let fragments = match (outcome, released) {
            (Ok(fragments), Ok(())) => fragments,
            (Ok(_), Err(cleanup)) => return Err(cleanup.into_indexing()),
            (Err(err), Ok(())) => return Err(err),
            (Err(err), Err(cleanup)) => {
                warn!("[LargeSearch] {} store cleanup failed after error: {}", search_id, cleanup);
                return Err(err);
            },
        };

        self.progress.mark_status(search_id, SearchStatus::Completed);
        Aggregator::new(Arc::clone(&self.completion), self.retry)
            .summarize(&params.query, &fragments)
            .await
    }

    async fn index_and_query(
        &self,
        search_id: &str,
        params: &SearchParams,
        store: &StoreId,
    ) -> Result<FragmentCollector, SearchError> {
        let total = params.chunker.total_chunks(&params.file_paths).await?;
        self.progress.set_total(search_id, total);
        info!("[LargeSearch] {} total_chunks={}", search_id, total);

        let indexer = BatchIndexer::new(Arc::clone(&self.store));
        let engine = QueryEngine::new(Arc::clone(&self.completion), params.max_results);
        let mut fragments = FragmentCollector::new();

        for path in &params.file_paths {
            let mut reader = params.chunker.open(path).await?;
            while let Some(batch) = reader.next_batch(params.chunker.batch_size()).await? {
                indexer.index(store, &batch).await?;
                self.progress.advance(search_id, batch.len() as u64);

                let answer = engine.query(store, &params.query).await?;
                if fragments.offer(answer) {
                    crate::metrics::record_fragment();
                }
            }
        }
        Ok(fragments)
    }
}

/// Marks a job `failed` if its future is dropped before an outcome is
/// recorded, so the record stays evictable.
struct UnfinishedJobGuard<'a> {
    progress: &'a dyn ProgressStore,
    search_id: &'a str,
    armed: bool,
}

impl<'a> UnfinishedJobGuard<'a> {
    fn new(progress: &'a dyn ProgressStore, search_id: &'a str) -> Self {
        Self { progress, search_id, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for UnfinishedJobGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.progress.mark_status(self.search_id, SearchStatus::Failed) {
            warn!("[LargeSearch] {} abandoned before finishing, marked failed", self.search_id);
        }
    }
}
