use std::sync::Arc;

use docsift_types::SearchError;

use crate::upstream::{CompletionRequest, CompletionService, StoreId};

/// Re-runs the user's query against whatever the store has indexed so far.
#[derive(Clone)]
pub struct QueryEngine {
    completion: Arc<dyn CompletionService>,
    max_results: u32,
}

impl QueryEngine {
    pub fn new(completion: Arc<dyn CompletionService>, max_results: u32) -> Self {
        Self { completion, max_results }
    }

    /// Answer text, possibly empty. Not retried.
    pub async fn query(&self, store: &StoreId, query: &str) -> Result<String, SearchError> {
        let request = CompletionRequest::text(query).with_file_search(store, self.max_results);
        self.completion
            .complete(request)
            .await
            .map(|response| response.text)
            .map_err(|e| e.into_completion())
    }
}

/// Per-batch answers in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentCollector {
    fragments: Vec<String>,
}

impl FragmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `text` if it has any non-whitespace content.
    pub fn offer(&mut self, text: String) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.fragments.push(text);
        true
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn joined(&self) -> String {
        self.fragments.join("\n\n")
    }
}
