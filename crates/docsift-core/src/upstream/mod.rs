//! Collaborator seams: the hosted completion service and the indexing store.
//!
//! The pipeline only sees [`CompletionService`] and [`IndexingStore`];
//! `Http*` implementations talk to an OpenAI-compatible API.

mod client_builder;
mod completion;
mod http;
mod index_store;

pub use client_builder::build_http_client;
pub use completion::HttpCompletionClient;
pub use http::UpstreamHttp;
pub use index_store::HttpIndexStore;

use std::fmt;

use async_trait::async_trait;
use docsift_types::protocol::{ResponseInput, Tool, Usage};
use serde_json::Value;

use crate::chunker::Batch;
use crate::error::UpstreamResult;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub input: ResponseInput,
    pub tools: Vec<Tool>,
    pub previous_response_id: Option<String>,
    /// JSON schema the answer must conform to
    pub output_schema: Option<Value>,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::new(ResponseInput::Text(prompt.into()))
    }

    pub fn new(input: ResponseInput) -> Self {
        Self { input, tools: Vec::new(), previous_response_id: None, output_schema: None }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_previous_response(mut self, response_id: impl Into<String>) -> Self {
        self.previous_response_id = Some(response_id.into());
        self
    }

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Restrict the model to a semantic search over `store`.
    pub fn with_file_search(self, store: &StoreId, max_results: u32) -> Self {
        self.with_tool(Tool::FileSearch {
            vector_store_ids: vec![store.as_str().to_string()],
            max_num_results: Some(max_results),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub text: String,
    pub status: String,
    pub usage: Usage,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> UpstreamResult<CompletionResponse>;
}

/// Opaque id of a remote document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreId(String);

impl StoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation that a batch finished indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAck {
    pub batch_id: String,
    pub file_ids: Vec<String>,
    pub indexed_files: u64,
}

#[async_trait]
pub trait IndexingStore: Send + Sync {
    async fn create_store(&self, name: &str) -> UpstreamResult<StoreId>;

    /// Upload every chunk of `batch` and wait until the store has indexed them.
    ///
    /// Called once per batch. Implementations retry individual requests
    /// themselves and never resend a chunk that was already accepted.
    async fn upload_batch(&self, store: &StoreId, batch: &Batch) -> UpstreamResult<BatchAck>;

    async fn delete_store(&self, store: &StoreId) -> UpstreamResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_options() {
        let request = CompletionRequest::text("what changed?")
            .with_file_search(&StoreId::new("vs_1"), 7)
            .with_previous_response("resp_0")
            .with_output_schema(serde_json::json!({"type": "object"}));

        assert_eq!(request.input, ResponseInput::Text("what changed?".to_string()));
        assert_eq!(
            request.tools,
            vec![Tool::FileSearch {
                vector_store_ids: vec!["vs_1".to_string()],
                max_num_results: Some(7)
            }]
        );
        assert_eq!(request.previous_response_id.as_deref(), Some("resp_0"));
        assert!(request.output_schema.is_some());
    }
}
