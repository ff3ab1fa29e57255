//! Base URL, auth and response decoding shared by the upstream clients.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use docsift_types::{UpstreamAuthMode, UpstreamConfig};

use super::client_builder::build_http_client;
use crate::error::{UpstreamError, UpstreamResult};

#[derive(Debug, Clone)]
pub struct UpstreamHttp {
    client: Client,
    base_url: Url,
    api_key: String,
    api_version: Option<String>,
    auth_mode: UpstreamAuthMode,
}

impl UpstreamHttp {
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let client = build_http_client(config.request_timeout_secs)?;
        Self::with_client(client, config)
    }

    /// Reuse an already built client (tests, shared pools).
    pub fn with_client(client: Client, config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut endpoint = config.endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base_url = Url::parse(&endpoint)
            .map_err(|e| UpstreamError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone().filter(|v| !v.is_empty()),
            auth_mode: config.auth_mode,
        })
    }

    /// `path` resolved against the endpoint, with `api-version` when configured.
    pub fn url(&self, path: &str) -> UpstreamResult<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| UpstreamError::Config(format!("invalid path '{}': {}", path, e)))?;
        if let Some(version) = &self.api_version {
            url.query_pairs_mut().append_pair("api-version", version);
        }
        Ok(url)
    }

    pub fn request(&self, method: Method, path: &str) -> UpstreamResult<RequestBuilder> {
        let builder = self.client.request(method, self.url(path)?);
        Ok(match self.auth_mode {
            UpstreamAuthMode::Bearer => builder.bearer_auth(&self.api_key),
            UpstreamAuthMode::ApiKeyHeader => builder.header("api-key", &self.api_key),
        })
    }

    /// Send `builder` and decode a 2xx JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> UpstreamResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
