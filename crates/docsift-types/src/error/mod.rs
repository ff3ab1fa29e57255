//! Typed error definitions for docsift.
//!
//! Every error kind carries a stable machine-readable code so callers can
//! tell a missing file from an upstream outage without parsing messages.

mod config;
mod search;

pub use config::ConfigError;
pub use search::SearchError;
