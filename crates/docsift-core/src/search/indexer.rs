use std::sync::Arc;

use docsift_types::SearchError;
use tracing::debug;

use crate::chunker::Batch;
use crate::upstream::{BatchAck, IndexingStore, StoreId};

/// Uploads one batch and waits until the store reports it indexed.
///
/// The batch is handed to the store exactly once; stores retry their own
/// idempotent requests.
#[derive(Clone)]
pub struct BatchIndexer {
    store: Arc<dyn IndexingStore>,
}

impl BatchIndexer {
    pub fn new(store: Arc<dyn IndexingStore>) -> Self {
        Self { store }
    }

    pub async fn index(&self, store_id: &StoreId, batch: &Batch) -> Result<BatchAck, SearchError> {
        let ack =
            self.store.upload_batch(store_id, batch).await.map_err(|e| e.into_indexing())?;
        debug!(
            "[Indexer] {} batch {} indexed as {} ({} file(s))",
            batch.source().display(),
            batch.ordinal(),
            ack.batch_id,
            ack.indexed_files
        );
        crate::metrics::record_batch_indexed(batch.len());
        Ok(ack)
    }
}
