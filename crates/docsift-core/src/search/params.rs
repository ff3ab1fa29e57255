use std::path::PathBuf;

use docsift_types::{LargeSearchRequest, PipelineConfig, SearchError};
use validator::Validate;

use crate::chunker::Chunker;

/// A submitted request with pipeline defaults filled in and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub file_paths: Vec<PathBuf>,
    pub max_results: u32,
    pub chunker: Chunker,
}

impl SearchParams {
    pub fn resolve(
        request: &LargeSearchRequest,
        defaults: &PipelineConfig,
    ) -> Result<Self, SearchError> {
        request.validate().map_err(|e| SearchError::invalid_request(e.to_string()))?;
        if request.query.trim().is_empty() {
            return Err(SearchError::invalid_request("query must not be blank"));
        }
        let chunker = Chunker::new(
            request.chunk_size.unwrap_or(defaults.chunk_size),
            request.batch_size.unwrap_or(defaults.batch_size),
        )?;
        Ok(Self {
            query: request.query.clone(),
            file_paths: request.file_paths.iter().map(PathBuf::from).collect(),
            max_results: request.max_results.unwrap_or(defaults.max_results),
            chunker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> LargeSearchRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_fill_omitted_fields() {
        let params = SearchParams::resolve(
            &request(r#"{"query":"revenue","file_paths":["/a.txt","/b.txt"]}"#),
            &PipelineConfig::default(),
        )
        .unwrap();
        assert_eq!(params.max_results, 20);
        assert_eq!(params.chunker.chunk_size(), 1024 * 1024);
        assert_eq!(params.chunker.batch_size(), 5);
        assert_eq!(params.file_paths.len(), 2);
    }

    #[test]
    fn test_request_values_override_defaults() {
        let params = SearchParams::resolve(
            &request(r#"{"query":"q","file_paths":[],"chunk_size":64,"batch_size":2,"max_results":3}"#),
            &PipelineConfig::default(),
        )
        .unwrap();
        assert_eq!(params.chunker.chunk_size(), 64);
        assert_eq!(params.chunker.batch_size(), 2);
        assert_eq!(params.max_results, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let defaults = PipelineConfig::default();
        for body in [
            r#"{"query":"q","file_paths":[],"batch_size":0}"#,
            r#"{"query":"q","file_paths":[],"chunk_size":0}"#,
            r#"{"query":"","file_paths":[]}"#,
            r#"{"query":"   ","file_paths":[]}"#,
            r#"{"query":"q","file_paths":[],"max_results":500}"#,
        ] {
            let err = SearchParams::resolve(&request(body), &defaults).unwrap_err();
            assert_eq!(err.code(), "invalid_request", "body: {}", body);
        }
    }
}
