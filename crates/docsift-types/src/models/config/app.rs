//! Top-level configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pipeline::PipelineConfig;
use super::progress::ProgressConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Full docsift configuration, as stored in `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, Validate)]
pub struct DocsiftConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    #[serde(default)]
    #[validate(nested)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    #[validate(nested)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    #[validate(nested)]
    pub progress: ProgressConfig,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: DocsiftConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DocsiftConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: DocsiftConfig =
            serde_json::from_str(r#"{"pipeline":{"batch_size":2}}"#).unwrap();
        assert_eq!(config.pipeline.batch_size, 2);
        assert_eq!(config.pipeline.chunk_size, crate::models::DEFAULT_CHUNK_SIZE);
        assert_eq!(config.server.port, 8045);
    }

    #[test]
    fn test_nested_validation_reports_bad_values() {
        let mut config = DocsiftConfig::default();
        config.pipeline.chunk_size = 0;
        assert!(config.validate().is_err());
    }
}
