use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

use service_hub_core::{
    config::SummaryConfig, types::SummaryRequest, Result, ServiceClients, ServiceResult,
};

use super::ServiceAdapter;
use crate::normalizer::{EnvelopeDepth, ResponseNormalizer};

/// Summarization on the function-invocation service.
///
/// Both the payload and the response carry their content JSON-encoded inside
/// a `body` string.
#[derive(Debug, Clone)]
pub struct SummaryAdapter {
    config: SummaryConfig,
    normalizer: ResponseNormalizer,
}

impl SummaryAdapter {
    pub fn new(config: SummaryConfig, no_summary: impl Into<String>) -> Self {
        Self {
            config,
            normalizer: ResponseNormalizer::new(EnvelopeDepth::Double, "/summary")
                .with_fallback(no_summary),
        }
    }

    pub fn payload(text: &str) -> serde_json::Value {
        json!({ "body": json!({ "text": text }).to_string() })
    }
}

#[async_trait]
impl ServiceAdapter for SummaryAdapter {
    type Request = SummaryRequest;

    fn name(&self) -> &'static str {
        "summary"
    }

    fn failure_label(&self) -> &'static str {
        "Error calling Lambda"
    }

    async fn call(&self, request: &SummaryRequest, clients: &ServiceClients) -> Result<ServiceResult> {
        tracing::debug!(
            function = %self.config.function_name,
            text_len = request.text.len(),
            "Invoking summary function"
        );

        let payload = Bytes::from(Self::payload(&request.text).to_string());
        let raw = clients
            .function
            .invoke_function(&self.config.function_name, payload)
            .await?;

        self.normalizer.normalize(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_hub_core::{mocks::MockBackends, ErrorKind};

    fn adapter() -> SummaryAdapter {
        SummaryAdapter::new(SummaryConfig::default(), "No summary returned")
    }

    #[tokio::test]
    async fn test_nested_envelope_both_ways() {
        let backends = MockBackends::new();
        backends
            .function
            .reply_json(json!({ "statusCode": 200, "body": "{\"summary\": \"A fox runs.\"}" }));

        let result = adapter()
            .invoke(&SummaryRequest { text: "The quick brown fox".into() }, &backends.clients())
            .await;

        assert_eq!(result, ServiceResult::text("A fox runs."));

        let call = &backends.function.calls()[0];
        assert_eq!(call.function_name, "summarize_lambda");
        let inner: serde_json::Value =
            serde_json::from_str(call.payload["body"].as_str().unwrap()).unwrap();
        assert_eq!(inner, json!({ "text": "The quick brown fox" }));
    }

    #[tokio::test]
    async fn test_missing_summary_uses_fallback() {
        let backends = MockBackends::new();
        backends.function.reply_json(json!({ "body": "{}" }));

        let result = adapter()
            .invoke(&SummaryRequest { text: "x".into() }, &backends.clients())
            .await;

        assert_eq!(result, ServiceResult::text("No summary returned"));
    }

    #[tokio::test]
    async fn test_single_encoded_body_is_parsing_failure() {
        let backends = MockBackends::new();
        backends.function.reply_json(json!({ "body": { "summary": "A fox runs." } }));

        let result = adapter()
            .invoke(&SummaryRequest { text: "x".into() }, &backends.clients())
            .await;

        match result {
            ServiceResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Parsing);
                assert!(message.starts_with("Error calling Lambda"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
