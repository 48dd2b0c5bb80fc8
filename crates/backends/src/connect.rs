//! Session setup: builds every remote client once, before any dispatch.
//!
//! Any problem here is an initialization error and ends the session.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use url::Url;

use service_hub_core::{
    config::AppConfig,
    traits::{AudioCapture, DocumentExtractor},
    Error, Result, ServiceClients,
};

use crate::{BedrockModelInvoker, LambdaFunctionInvoker, LexConversationAgent, ReqwestHttpGateway};

/// Remote clients for one session.
#[derive(Debug, Clone)]
pub struct RemoteClients {
    pub model: Arc<BedrockModelInvoker>,
    pub function: Arc<LambdaFunctionInvoker>,
    pub http: Arc<ReqwestHttpGateway>,
    pub agent: Arc<LexConversationAgent>,
}

impl RemoteClients {
    /// Complete the handle object with the local collaborators.
    pub fn into_service_clients(
        self,
        capture: Arc<dyn AudioCapture>,
        extractor: Arc<dyn DocumentExtractor>,
    ) -> ServiceClients {
        ServiceClients {
            model: self.model,
            function: self.function,
            http: self.http,
            agent: self.agent,
            capture,
            extractor,
        }
    }
}

/// Check that `endpoint` is an absolute http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::initialization(format!("Invalid endpoint URL `{}`: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        scheme => Err(Error::initialization(format!(
            "Endpoint `{}` must be an http(s) URL with a host, got scheme `{}`",
            endpoint, scheme
        ))),
    }
}

/// Load the shared AWS configuration for the configured region.
pub async fn load_sdk_config(config: &AppConfig) -> Result<SdkConfig> {
    let region = config.aws.region.trim();
    if region.is_empty() {
        return Err(Error::initialization("AWS region is not configured"));
    }

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    if let Some(endpoint) = &config.aws.endpoint_url {
        validate_endpoint(endpoint)?;
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;

    if sdk_config.credentials_provider().is_none() {
        return Err(Error::initialization("No AWS credentials provider is available"));
    }

    tracing::info!(region = region, "AWS configuration loaded");
    Ok(sdk_config)
}

/// Build every remote client for a session.
pub async fn connect(config: &AppConfig) -> Result<RemoteClients> {
    validate_endpoint(&config.services.translation.endpoint)?;

    let sdk_config = load_sdk_config(config).await?;

    let clients = RemoteClients {
        model: Arc::new(BedrockModelInvoker::new(&sdk_config)),
        function: Arc::new(LambdaFunctionInvoker::new(&sdk_config)),
        http: Arc::new(ReqwestHttpGateway::new(
            config.services.translation.api_key.clone(),
        )?),
        agent: Arc::new(LexConversationAgent::new(&sdk_config)),
    };

    tracing::info!("Remote service clients ready");
    Ok(clients)
}
