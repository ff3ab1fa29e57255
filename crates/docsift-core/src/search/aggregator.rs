use std::sync::Arc;

use docsift_types::SearchError;
use tracing::debug;

use super::query::FragmentCollector;
use crate::retry::RetryPolicy;
use crate::upstream::{CompletionRequest, CompletionService};

pub fn summary_prompt(query: &str, joined: &str) -> String {
    format!("Summarize and combine these search results about '{}':\n\n{}", query, joined)
}

/// Folds the collected fragments into one answer with a single completion call.
#[derive(Clone)]
pub struct Aggregator {
    completion: Arc<dyn CompletionService>,
    retry: RetryPolicy,
}

impl Aggregator {
    pub fn new(completion: Arc<dyn CompletionService>, retry: RetryPolicy) -> Self {
        Self { completion, retry }
    }

    /// Always issues the request, even with no fragments.
    pub async fn summarize(
        &self,
        query: &str,
        fragments: &FragmentCollector,
    ) -> Result<String, SearchError> {
        let prompt = summary_prompt(query, &fragments.joined());
        debug!("[Aggregator] Summarizing {} fragment(s)", fragments.len());
        self.retry
            .run("summarize", || self.completion.complete(CompletionRequest::text(prompt.clone())))
            .await
            .map(|response| response.text)
            .map_err(|e| e.into_completion())
    }
}
