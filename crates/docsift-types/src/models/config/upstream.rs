//! Hosted completion / indexing service configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// How the API key is presented to the upstream service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamAuthMode {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `api-key: <key>` header (Azure-style deployments)
    ApiKeyHeader,
}

impl fmt::Display for UpstreamAuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Bearer => write!(f, "bearer"),
            Self::ApiKeyHeader => write!(f, "api_key_header"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct UpstreamConfig {
    /// Base URL, e.g. `https://example.openai.azure.com/openai`
    #[validate(url)]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// Appended as `?api-version=` when set
    #[serde(default)]
    pub api_version: Option<String>,
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub auth_mode: UpstreamAuthMode,
    #[validate(range(min = 5_u64, max = 3600_u64))]
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Delay between file batch status polls
    #[validate(range(min = 10_u64, max = 60_000_u64))]
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on waiting for a single batch to finish indexing
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_index_timeout")]
    pub index_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            api_version: None,
            model: default_model(),
            auth_mode: UpstreamAuthMode::default(),
            request_timeout_secs: default_request_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            index_timeout_secs: default_index_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

const fn default_request_timeout() -> u64 {
    300
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_index_timeout() -> u64 {
    600
}
