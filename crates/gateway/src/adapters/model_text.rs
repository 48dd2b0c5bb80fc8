use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

use service_hub_core::{
    config::ModelConfig, types::TextPrompt, Result, ServiceClients, ServiceResult,
};

use super::ServiceAdapter;
use crate::normalizer::{EnvelopeDepth, ResponseNormalizer};

/// Chat-style text generation on the model-invocation service.
#[derive(Debug, Clone)]
pub struct ModelTextAdapter {
    config: ModelConfig,
    normalizer: ResponseNormalizer,
}

impl ModelTextAdapter {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            normalizer: ResponseNormalizer::new(EnvelopeDepth::Single, "/content/0/text"),
        }
    }

    /// Request body: version marker, one user message, fixed sampling.
    pub fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "anthropic_version": self.config.anthropic_version,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl ServiceAdapter for ModelTextAdapter {
    type Request = TextPrompt;

    fn name(&self) -> &'static str {
        "model_text"
    }

    fn failure_label(&self) -> &'static str {
        "Error generating text"
    }

    async fn call(&self, request: &TextPrompt, clients: &ServiceClients) -> Result<ServiceResult> {
        tracing::debug!(
            model = %self.config.text_model_id,
            prompt_len = request.prompt.len(),
            "Calling text model"
        );

        let body = Bytes::from(self.request_body(&request.prompt).to_string());
        let raw = clients.model.invoke_model(&self.config.text_model_id, body).await?;

        self.normalizer.normalize(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_hub_core::{mocks::MockBackends, ErrorKind};

    #[tokio::test]
    async fn test_first_content_block_returned() {
        let backends = MockBackends::new();
        backends.model.reply_json(json!({
            "content": [{ "type": "text", "text": "Rust is a language." }, { "type": "text", "text": "ignored" }]
        }));
        let adapter = ModelTextAdapter::new(ModelConfig::default());

        let result = adapter
            .invoke(&TextPrompt { prompt: "What is Rust?".into() }, &backends.clients())
            .await;

        assert_eq!(result, ServiceResult::text("Rust is a language."));

        let call = &backends.model.calls()[0];
        assert_eq!(call.model_id, "anthropic.claude-3-5-sonnet-20240620-v1:0");
        assert_eq!(call.body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(call.body["messages"][0]["role"], "user");
        assert_eq!(call.body["messages"][0]["content"], "What is Rust?");
        assert_eq!(call.body["max_tokens"], 500);
        assert_eq!(call.body["temperature"], 0.7);
    }

    #[tokio::test]
    async fn test_invocation_failure_contained() {
        let backends = MockBackends::new();
        backends.model.fail("throttled");
        let adapter = ModelTextAdapter::new(ModelConfig::default());

        let result = adapter
            .invoke(&TextPrompt { prompt: "hi".into() }, &backends.clients())
            .await;

        match result {
            ServiceResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Invocation);
                assert!(message.starts_with("Error generating text"));
                assert!(message.contains("throttled"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_parsing_failure() {
        let backends = MockBackends::new();
        backends.model.reply_json(json!({ "content": [] }));
        let adapter = ModelTextAdapter::new(ModelConfig::default());

        let result = adapter
            .invoke(&TextPrompt { prompt: "hi".into() }, &backends.clients())
            .await;

        assert!(matches!(
            result,
            ServiceResult::Failure { kind: ErrorKind::Parsing, .. }
        ));
    }
}
