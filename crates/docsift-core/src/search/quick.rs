use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use docsift_types::{FileSearchRequest, FileSearchResponse, PipelineConfig, SearchError};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::indexer::BatchIndexer;
use super::lease::StoreLease;
use super::query::QueryEngine;
use crate::chunker::Batch;
use crate::upstream::{CompletionService, IndexingStore};

/// Whole-file search: upload each file unchunked, ask once. No progress record.
#[derive(Clone)]
pub struct FileSearch {
    store: Arc<dyn IndexingStore>,
    completion: Arc<dyn CompletionService>,
    default_max_results: u32,
}

impl FileSearch {
    pub fn new(
        store: Arc<dyn IndexingStore>,
        completion: Arc<dyn CompletionService>,
        pipeline: &PipelineConfig,
    ) -> Self {
        Self { store, completion, default_max_results: pipeline.max_results }
    }

    /// Run on a separate task; dropping the returned future does not stop it.
    pub async fn run_detached(
        &self,
        request: FileSearchRequest,
    ) -> Result<FileSearchResponse, SearchError> {
        let search = self.clone();
        tokio::spawn(async move { search.run(&request).await }).await.map_err(|e| {
            SearchError::Internal { message: format!("file search task ended abnormally: {}", e) }
        })?
    }

    pub async fn run(&self, request: &FileSearchRequest) -> Result<FileSearchResponse, SearchError> {
        request.validate().map_err(|e| SearchError::invalid_request(e.to_string()))?;
        let paths: Vec<PathBuf> = request.file_paths.iter().map(PathBuf::from).collect();

        let mut batches = Vec::with_capacity(paths.len());
        for path in paths {
            let data = tokio::fs::read(&path)
                .await
                .map_err(|e| SearchError::io(path.display().to_string(), &e))?;
            batches.push(Batch::whole_file(path, Bytes::from(data)));
        }

        let lease = StoreLease::acquire(
            Arc::clone(&self.store),
            &format!("File Search Documents {}", Uuid::new_v4()),
        )
        .await
        .map_err(|e| e.into_indexing())?;

        let engine = QueryEngine::new(
            Arc::clone(&self.completion),
            request.max_results.unwrap_or(self.default_max_results),
        );
        let indexer = BatchIndexer::new(Arc::clone(&self.store));
        let outcome = async {
            for batch in &batches {
                indexer.index(lease.id(), batch).await?;
            }
            engine.query(lease.id(), &request.query).await
        }
        .await;

        let released = lease.release().await;
        match (outcome, released) {
            (Ok(response), Ok(())) => {
                info!("[FileSearch] Answered over {} file(s)", batches.len());
                Ok(FileSearchResponse { response })
            },
            (Ok(_), Err(cleanup)) => Err(cleanup.into_indexing()),
            (Err(err), released) => {
                if let Err(cleanup) = released {
                    warn!("[FileSearch] Store cleanup failed after error: {}", cleanup);
                }
                Err(err)
            },
        }
    }
}
