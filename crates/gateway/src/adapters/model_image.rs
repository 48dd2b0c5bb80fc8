use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde_json::json;

use service_hub_core::{
    config::ModelConfig, types::ImagePrompt, Error, Result, ServiceClients, ServiceResult,
};

use super::ServiceAdapter;
use crate::normalizer::{EnvelopeDepth, ResponseNormalizer};
use crate::vision::inspect_image;

/// Image generation on the model-invocation service.
#[derive(Debug, Clone)]
pub struct ModelImageAdapter {
    config: ModelConfig,
    normalizer: ResponseNormalizer,
}

impl ModelImageAdapter {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            normalizer: ResponseNormalizer::new(EnvelopeDepth::Single, "/artifacts/0/base64"),
        }
    }

    pub fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "text_prompts": [{ "text": prompt }],
            "cfg_scale": self.config.cfg_scale,
            "seed": self.config.seed,
            "steps": self.config.steps,
        })
    }
}

#[async_trait]
impl ServiceAdapter for ModelImageAdapter {
    type Request = ImagePrompt;

    fn name(&self) -> &'static str {
        "model_image"
    }

    fn failure_label(&self) -> &'static str {
        "Error generating image"
    }

    async fn call(&self, request: &ImagePrompt, clients: &ServiceClients) -> Result<ServiceResult> {
        tracing::debug!(
            model = %self.config.image_model_id,
            prompt = %request.prompt,
            "Calling image model"
        );

        let body = Bytes::from(self.request_body(&request.prompt).to_string());
        let raw = clients.model.invoke_model(&self.config.image_model_id, body).await?;

        let encoded = self.normalizer.extract_text(&raw)?;
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::parsing(format!("image artifact is not base64: {}", e)))?;

        let info = inspect_image(&data)?;
        tracing::debug!(
            width = info.width,
            height = info.height,
            format = info.format.mime_type(),
            "Image artifact decoded"
        );

        Ok(ServiceResult::Image {
            data,
            format: info.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::tiny_png;
    use service_hub_core::{mocks::MockBackends, types::ImageFormat, ErrorKind};

    #[tokio::test]
    async fn test_artifact_decoded() {
        let png = tiny_png();
        let backends = MockBackends::new();
        backends
            .model
            .reply_json(json!({ "artifacts": [{ "base64": STANDARD.encode(&png) }] }));
        let adapter = ModelImageAdapter::new(ModelConfig::default());

        let result = adapter
            .invoke(&ImagePrompt { prompt: "a cat".into() }, &backends.clients())
            .await;

        assert_eq!(
            result,
            ServiceResult::Image {
                data: png,
                format: ImageFormat::Png
            }
        );

        let call = &backends.model.calls()[0];
        assert_eq!(call.model_id, "stability.stable-diffusion-xl-v1");
        assert_eq!(call.body["text_prompts"][0]["text"], "a cat");
        assert_eq!(call.body["cfg_scale"], 10);
        assert!(call.body["cfg_scale"].is_u64());
        assert_eq!(call.body["seed"], 42);
        assert_eq!(call.body["steps"], 50);
    }

    #[tokio::test]
    async fn test_bad_base64_is_parsing_failure() {
        let backends = MockBackends::new();
        backends
            .model
            .reply_json(json!({ "artifacts": [{ "base64": "***" }] }));
        let adapter = ModelImageAdapter::new(ModelConfig::default());

        let result = adapter
            .invoke(&ImagePrompt { prompt: "a cat".into() }, &backends.clients())
            .await;

        match result {
            ServiceResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Parsing);
                assert!(message.starts_with("Error generating image"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
