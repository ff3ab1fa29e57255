//! Shared reqwest client construction.

use std::time::Duration;

use reqwest::Client;

use crate::error::{UpstreamError, UpstreamResult};

/// Client with the request timeout and keepalive settings used for every
/// upstream call.
pub fn build_http_client(timeout_secs: u64) -> UpstreamResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(30))
        .tcp_nodelay(true)
        .http2_keep_alive_interval(Duration::from_secs(25))
        .http2_keep_alive_timeout(Duration::from_secs(10))
        .http2_keep_alive_while_idle(true)
        .build()
        .map_err(|e| UpstreamError::Config(format!("HTTP client builder failed: {e}")))
}
