//! Completion client over the `responses` endpoint.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use docsift_types::protocol::{ResponsesReply, ResponsesRequest, TextConfig, TextFormat};

use super::http::UpstreamHttp;
use super::{CompletionRequest, CompletionResponse, CompletionService};
use crate::error::UpstreamResult;

/// Schema name sent with structured-output requests.
const OUTPUT_SCHEMA_NAME: &str = "structured_data";

#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: UpstreamHttp,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(http: UpstreamHttp, model: impl Into<String>) -> Self {
        Self { http, model: model.into() }
    }

    fn wire_request(&self, request: CompletionRequest) -> ResponsesRequest {
        ResponsesRequest {
            model: self.model.clone(),
            input: request.input,
            tools: request.tools,
            previous_response_id: request.previous_response_id,
            text: request.output_schema.map(|schema| TextConfig {
                format: TextFormat::JsonSchema {
                    name: OUTPUT_SCHEMA_NAME.to_string(),
                    schema,
                    strict: true,
                },
            }),
        }
    }
}

#[async_trait]
impl CompletionService for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> UpstreamResult<CompletionResponse> {
        let body = self.wire_request(request);
        debug!("[Completion] model={} tools={}", body.model, body.tools.len());
        let builder = self.http.request(Method::POST, "responses")?.json(&body);
        let reply: ResponsesReply = self.http.send_json(builder).await?;
        Ok(CompletionResponse {
            text: reply.text(),
            status: reply.status.clone().unwrap_or_else(|| "completed".to_string()),
            usage: reply.usage.clone().unwrap_or_default(),
            id: reply.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_types::UpstreamConfig;

    #[test]
    fn test_output_schema_becomes_strict_json_schema() {
        let http = UpstreamHttp::new(&UpstreamConfig::default()).unwrap();
        let client = HttpCompletionClient::new(http, "gpt-4o");
        let wire = client.wire_request(
            CompletionRequest::text("extract").with_output_schema(serde_json::json!({"type": "object"})),
        );
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["text"]["format"]["type"], "json_schema");
        assert_eq!(json["text"]["format"]["name"], "structured_data");
        assert_eq!(json["text"]["format"]["strict"], true);
        assert!(json.get("tools").is_none());
    }
}
