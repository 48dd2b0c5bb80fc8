//! reqwest implementation of HttpGateway.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

use service_hub_core::{
    traits::{HttpGateway, HttpResponse},
    Error, Result,
};

/// Header carrying the gateway API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// JSON POSTs against an API gateway.
#[derive(Clone)]
pub struct ReqwestHttpGateway {
    client: reqwest::Client,
    api_key: Option<Secret<String>>,
}

impl ReqwestHttpGateway {
    pub fn new(api_key: Option<Secret<String>>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("service-hub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::initialization(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_key })
    }
}

impl std::fmt::Debug for ReqwestHttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpGateway")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[async_trait]
impl HttpGateway for ReqwestHttpGateway {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret().as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::invocation(format!("HTTP request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::invocation(format!("HTTP response body read failed: {}", e)))?;

        tracing::debug!(url = url, status = status, body_len = body.len(), "Gateway responded");

        Ok(HttpResponse { status, body })
    }
}
