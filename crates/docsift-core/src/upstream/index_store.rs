//! Indexing store over the `files` and `vector_stores` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use docsift_types::protocol::{
    CreateFileBatchRequest, CreateVectorStoreRequest, DeletionStatus, FileBatch, FileBatchStatus,
    FileObject, VectorStore,
};
use docsift_types::UpstreamConfig;

use super::http::UpstreamHttp;
use super::{BatchAck, IndexingStore, StoreId};
use crate::chunker::Batch;
use crate::error::{UpstreamError, UpstreamResult};
use crate::retry::RetryPolicy;

const UPLOAD_PURPOSE: &str = "assistants";
const CHUNK_MIME: &str = "text/plain";

/// Each request is retried on its own under `retry`, so a transient failure
/// never re-uploads chunks that were already accepted.
#[derive(Debug, Clone)]
pub struct HttpIndexStore {
    http: UpstreamHttp,
    poll_interval: Duration,
    index_timeout: Duration,
    retry: RetryPolicy,
}

impl HttpIndexStore {
    pub fn new(http: UpstreamHttp, config: &UpstreamConfig) -> Self {
        Self {
            http,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            index_timeout: Duration::from_secs(config.index_timeout_secs),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn upload_file(&self, name: String, data: bytes::Bytes) -> UpstreamResult<FileObject> {
        self.retry
            .run("upload_file", || self.send_file(name.clone(), data.clone()))
            .await
    }

    async fn send_file(&self, name: String, data: bytes::Bytes) -> UpstreamResult<FileObject> {
        let length = data.len() as u64;
        let part = Part::stream_with_length(data, length)
            .file_name(name)
            .mime_str(CHUNK_MIME)
            .map_err(|e| UpstreamError::Config(format!("invalid mime type: {e}")))?;
        let form = Form::new().text("purpose", UPLOAD_PURPOSE).part("file", part);
        let builder = self.http.request(Method::POST, "files")?.multipart(form);
        self.http.send_json(builder).await
    }

    async fn wait_for_batch(&self, store: &StoreId, mut batch: FileBatch) -> UpstreamResult<FileBatch> {
        let deadline = Instant::now() + self.index_timeout;
        let path = format!("vector_stores/{}/file_batches/{}", store, batch.id);
        while !batch.status.is_settled() {
            if Instant::now() >= deadline {
                return Err(UpstreamError::Timeout {
                    what: format!("file batch {}", batch.id),
                    secs: self.index_timeout.as_secs(),
                });
            }
            sleep(self.poll_interval).await;
            let (http, path) = (&self.http, path.as_str());
            batch = self
                .retry
                .run("poll_file_batch", || async move {
                    http.send_json::<FileBatch>(http.request(Method::GET, path)?).await
                })
                .await?;
            debug!(
                "[IndexStore] batch {} status={:?} completed={}/{}",
                batch.id, batch.status, batch.file_counts.completed, batch.file_counts.total
            );
        }
        Ok(batch)
    }
}

#[async_trait]
impl IndexingStore for HttpIndexStore {
    async fn create_store(&self, name: &str) -> UpstreamResult<StoreId> {
        let builder = self
            .http
            .request(Method::POST, "vector_stores")?
            .json(&CreateVectorStoreRequest { name: name.to_string() });
        let store: VectorStore = self.http.send_json(builder).await?;
        info!("[IndexStore] Created store {} ({})", store.id, name);
        Ok(StoreId::new(store.id))
    }

    async fn upload_batch(&self, store: &StoreId, batch: &Batch) -> UpstreamResult<BatchAck> {
        // Chunk uploads run concurrently; file ids keep chunk order.
        let uploads = batch
            .chunks()
            .iter()
            .enumerate()
            .map(|(offset, chunk)| self.upload_file(batch.chunk_name(offset), chunk.clone()));
        let file_ids: Vec<String> =
            try_join_all(uploads).await?.into_iter().map(|file| file.id).collect();

        let create_path = format!("vector_stores/{}/file_batches", store);
        let body = CreateFileBatchRequest { file_ids: file_ids.clone() };
        let (http, create_path, body) = (&self.http, create_path.as_str(), &body);
        let created: FileBatch = self
            .retry
            .run("create_file_batch", || async move {
                http.send_json(http.request(Method::POST, create_path)?.json(body)).await
            })
            .await?;
        let settled = self.wait_for_batch(store, created).await?;

        match settled.status {
            FileBatchStatus::Completed if settled.file_counts.failed == 0 => Ok(BatchAck {
                batch_id: settled.id,
                file_ids,
                indexed_files: settled.file_counts.completed,
            }),
            FileBatchStatus::Completed => Err(UpstreamError::Rejected(format!(
                "file batch {} completed with {} failed file(s)",
                settled.id, settled.file_counts.failed
            ))),
            status => Err(UpstreamError::Rejected(format!(
                "file batch {} ended with status {:?}",
                settled.id, status
            ))),
        }
    }

    async fn delete_store(&self, store: &StoreId) -> UpstreamResult<()> {
        let builder = self.http.request(Method::DELETE, &format!("vector_stores/{}", store))?;
        let status: DeletionStatus = self.http.send_json(builder).await?;
        if !status.deleted {
            return Err(UpstreamError::Rejected(format!("store {} was not deleted", store)));
        }
        info!("[IndexStore] Deleted store {}", store);
        Ok(())
    }
}
