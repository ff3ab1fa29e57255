//! Search pipeline defaults and retry policy.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RESULTS};

/// Defaults applied when a request omits its tuning fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct PipelineConfig {
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[validate(range(min = 1_u32, max = 50_u32))]
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    #[validate(nested)]
    pub retry: RetryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
            retry: RetryConfig::default(),
        }
    }
}

/// Bounded exponential backoff for transient upstream failures.
///
/// `max_attempts = 1` disables retrying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RetryConfig {
    #[validate(range(min = 1_u32, max = 10_u32))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

const fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

const fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

const fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    500
}

const fn default_max_delay_ms() -> u64 {
    8000
}
