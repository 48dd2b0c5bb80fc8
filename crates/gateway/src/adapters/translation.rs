use async_trait::async_trait;
use serde_json::json;

use service_hub_core::{
    config::TranslationConfig, types::TranslationRequest, Error, Result, ServiceClients,
    ServiceResult,
};

use super::ServiceAdapter;
use crate::normalizer::{EnvelopeDepth, ResponseNormalizer};

/// Translation through the HTTP gateway.
#[derive(Debug, Clone)]
pub struct TranslationAdapter {
    config: TranslationConfig,
    normalizer: ResponseNormalizer,
}

impl TranslationAdapter {
    pub fn new(config: TranslationConfig, no_translation: impl Into<String>) -> Self {
        Self {
            config,
            normalizer: ResponseNormalizer::new(EnvelopeDepth::Double, "/translation")
                .with_fallback(no_translation),
        }
    }

    pub fn payload(request: &TranslationRequest) -> serde_json::Value {
        let inner = json!({
            "text": request.text,
            "direction": request.direction.as_str(),
        });
        json!({ "body": inner.to_string() })
    }
}

#[async_trait]
impl ServiceAdapter for TranslationAdapter {
    type Request = TranslationRequest;

    fn name(&self) -> &'static str {
        "translation"
    }

    fn failure_label(&self) -> &'static str {
        "Error calling API Gateway"
    }

    async fn call(
        &self,
        request: &TranslationRequest,
        clients: &ServiceClients,
    ) -> Result<ServiceResult> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            direction = %request.direction,
            text_len = request.text.len(),
            "Posting translation request"
        );

        let response = clients
            .http
            .post_json(&self.config.endpoint, &Self::payload(request))
            .await?;

        if !response.is_success() {
            return Err(Error::transport(response.status));
        }

        self.normalizer.normalize(response.body.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_hub_core::{mocks::MockBackends, types::TranslationDirection, ErrorKind};

    fn adapter() -> TranslationAdapter {
        TranslationAdapter::new(TranslationConfig::default(), "Translation not found")
    }

    fn request(text: &str, direction: TranslationDirection) -> TranslationRequest {
        TranslationRequest {
            text: text.into(),
            direction,
        }
    }

    #[tokio::test]
    async fn test_translation_extracted() {
        let backends = MockBackends::new();
        backends
            .http
            .reply(200, r#"{"statusCode": 200, "body": "{\"translation\": \"Good morning\"}"}"#);

        let result = adapter()
            .invoke(&request("Buenos dias", TranslationDirection::EsEn), &backends.clients())
            .await;

        assert_eq!(result, ServiceResult::text("Good morning"));

        let call = &backends.http.calls()[0];
        assert_eq!(call.url, TranslationConfig::default().endpoint);
        let inner: serde_json::Value =
            serde_json::from_str(call.body["body"].as_str().unwrap()).unwrap();
        assert_eq!(inner, json!({ "text": "Buenos dias", "direction": "es-en" }));
    }

    #[tokio::test]
    async fn test_not_found_status_in_failure() {
        let backends = MockBackends::new();
        backends.http.reply(404, "Not Found");

        let result = adapter()
            .invoke(&request("hola", TranslationDirection::AutoEn), &backends.clients())
            .await;

        match result {
            ServiceResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Transport);
                assert!(message.contains("404"));
                assert!(message.starts_with("Error calling API Gateway"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_translation_uses_fallback() {
        let backends = MockBackends::new();
        backends.http.reply(200, r#"{"body": "{\"error\": null}"}"#);

        let result = adapter()
            .invoke(&request("hola", TranslationDirection::AutoEn), &backends.clients())
            .await;

        assert_eq!(result, ServiceResult::text("Translation not found"));
    }
}
