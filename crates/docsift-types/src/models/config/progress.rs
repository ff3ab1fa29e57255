//! Progress record retention.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Bounds on the in-memory progress map.
///
/// Only terminal (completed/failed) records are ever evicted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ProgressConfig {
    /// Age after which a finished record may be dropped
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

const fn default_ttl_secs() -> u64 {
    3600
}

const fn default_max_entries() -> usize {
    10_000
}

const fn default_sweep_interval_secs() -> u64 {
    60
}
