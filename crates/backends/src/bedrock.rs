//! Bedrock implementation of ModelInvoker.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{error::DisplayErrorContext, primitives::Blob, Client};
use bytes::Bytes;

use service_hub_core::{traits::ModelInvoker, Error, Result};

/// Model invocation through the Bedrock runtime.
#[derive(Debug, Clone)]
pub struct BedrockModelInvoker {
    client: Client,
}

impl BedrockModelInvoker {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Create with custom client (for testing/custom config).
    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelInvoker for BedrockModelInvoker {
    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body.to_vec()))
            .send()
            .await
            .map_err(|e| {
                Error::invocation(format!("Bedrock invoke_model error: {}", DisplayErrorContext(&e)))
            })?;

        Ok(Bytes::from(output.body.into_inner()))
    }
}
