//! Remote service client traits.
//!
//! Each trait exposes the single call the core needs from a backend. Concrete
//! clients own authentication, region and transport details.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::Result;

/// Synchronous generative-model invocation.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Invoke `model_id` with a JSON request body, returning the raw response body.
    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes>;
}

/// Request/response invocation of a named remote function.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Invoke `function_name` with a JSON payload, returning the raw response payload.
    async fn invoke_function(&self, function_name: &str, payload: Bytes) -> Result<Bytes>;
}

/// Raw HTTP response from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// JSON POST against an HTTP gateway.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// POST `body` to `url`. Non-success statuses are returned, not raised.
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse>;
}

/// One recognize-utterance call against a conversational agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRequest {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub session_id: String,
    pub request_content_type: String,
    pub response_content_type: String,
    pub audio: Bytes,
}

/// Agent reply as received, before any decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtteranceResponse {
    /// Transcript header exactly as sent by the service.
    pub input_transcript: Option<String>,
    /// Response audio, if the agent produced any.
    pub audio_stream: Option<Bytes>,
    pub content_type: Option<String>,
}

/// Speech recognition plus dialogue response over an audio utterance.
#[async_trait]
pub trait ConversationAgent: Send + Sync {
    async fn recognize_utterance(&self, request: UtteranceRequest) -> Result<UtteranceResponse>;
}
