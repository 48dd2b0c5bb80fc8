//! Mock implementations of the client traits for testing.
//!
//! Every mock records what it was called with and replies from a scripted
//! queue, so tests can assert on the exact wire payloads an adapter built.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{
    clients::ServiceClients,
    traits::{
        AudioCapture, ConversationAgent, DocumentExtractor, FunctionInvoker, HttpGateway,
        HttpResponse, ModelInvoker, UtteranceRequest, UtteranceResponse,
    },
    types::{CaptureDuration, PcmBuffer},
    Error, Result,
};

/// Scripted reply: either a value or an error message.
type Scripted<T> = std::result::Result<T, String>;

fn next_reply<T: Clone>(queue: &Mutex<VecDeque<Scripted<T>>>, fallback: Scripted<T>) -> Scripted<T> {
    let mut queue = queue.lock().unwrap();
    if queue.len() > 1 {
        queue.pop_front().unwrap_or(fallback)
    } else {
        // The last scripted reply repeats.
        queue.front().cloned().unwrap_or(fallback)
    }
}

// =============================================================================
// Mock Model Invoker
// =============================================================================

/// Recorded model invocation.
#[derive(Debug, Clone)]
pub struct ModelCall {
    pub model_id: String,
    pub body: Value,
}

#[derive(Default)]
pub struct MockModelInvoker {
    replies: Mutex<VecDeque<Scripted<Bytes>>>,
    calls: Mutex<Vec<ModelCall>>,
}

impl MockModelInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response body.
    pub fn reply_json(&self, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(Bytes::from(body.to_string())));
        self
    }

    /// Queue a raw response body.
    pub fn reply_raw(&self, body: impl Into<Bytes>) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queue an invocation failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelInvoker for MockModelInvoker {
    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes> {
        let body = serde_json::from_slice(&body)?;
        self.calls.lock().unwrap().push(ModelCall {
            model_id: model_id.to_string(),
            body,
        });
        next_reply(&self.replies, Err("no scripted model reply".into())).map_err(Error::invocation)
    }
}

// =============================================================================
// Mock Function Invoker
// =============================================================================

/// Recorded function invocation.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub function_name: String,
    pub payload: Value,
}

#[derive(Default)]
pub struct MockFunctionInvoker {
    replies: Mutex<VecDeque<Scripted<Bytes>>>,
    calls: Mutex<Vec<FunctionCall>>,
}

impl MockFunctionInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, payload: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(Bytes::from(payload.to_string())));
        self
    }

    pub fn reply_raw(&self, payload: impl Into<Bytes>) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(payload.into()));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<FunctionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FunctionInvoker for MockFunctionInvoker {
    async fn invoke_function(&self, function_name: &str, payload: Bytes) -> Result<Bytes> {
        let payload = serde_json::from_slice(&payload)?;
        self.calls.lock().unwrap().push(FunctionCall {
            function_name: function_name.to_string(),
            payload,
        });
        next_reply(&self.replies, Err("no scripted function reply".into())).map_err(Error::invocation)
    }
}

// =============================================================================
// Mock HTTP Gateway
// =============================================================================

/// Recorded HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpCall {
    pub url: String,
    pub body: Value,
}

#[derive(Default)]
pub struct MockHttpGateway {
    replies: Mutex<VecDeque<Scripted<HttpResponse>>>,
    calls: Mutex<Vec<HttpCall>>,
}

impl MockHttpGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGateway for MockHttpGateway {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(HttpCall {
            url: url.to_string(),
            body: body.clone(),
        });
        next_reply(&self.replies, Err("no scripted HTTP reply".into())).map_err(Error::invocation)
    }
}

// =============================================================================
// Mock Conversation Agent
// =============================================================================

#[derive(Default)]
pub struct MockConversationAgent {
    replies: Mutex<VecDeque<Scripted<UtteranceResponse>>>,
    calls: Mutex<Vec<UtteranceRequest>>,
}

impl MockConversationAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, response: UtteranceResponse) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<UtteranceRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationAgent for MockConversationAgent {
    async fn recognize_utterance(&self, request: UtteranceRequest) -> Result<UtteranceResponse> {
        self.calls.lock().unwrap().push(request);
        next_reply(&self.replies, Err("no scripted agent reply".into())).map_err(Error::invocation)
    }
}

// =============================================================================
// Static Collaborators
// =============================================================================

/// Capture service that hands out a fixed recording.
pub struct StaticCapture {
    buffer: Option<PcmBuffer>,
    requested: Mutex<Vec<CaptureDuration>>,
}

impl StaticCapture {
    pub fn new(buffer: PcmBuffer) -> Self {
        Self {
            buffer: Some(buffer),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A capture device that is unavailable.
    pub fn unavailable() -> Self {
        Self {
            buffer: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<CaptureDuration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioCapture for StaticCapture {
    async fn capture(&self, duration: CaptureDuration) -> Result<PcmBuffer> {
        self.requested.lock().unwrap().push(duration);
        let mut buffer = self
            .buffer
            .clone()
            .ok_or_else(|| Error::capture("no capture device available"))?;
        buffer.truncate_to(duration);
        Ok(buffer)
    }
}

/// Extractor that returns fixed page texts regardless of input.
pub struct StaticExtractor {
    pages: Scripted<Vec<String>>,
}

impl StaticExtractor {
    pub fn pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: Ok(pages.into_iter().map(Into::into).collect()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            pages: Err(message.to_string()),
        }
    }
}

impl DocumentExtractor for StaticExtractor {
    fn extract_pages(&self, _document: &[u8]) -> Result<Vec<String>> {
        self.pages.clone().map_err(Error::parsing)
    }
}

// =============================================================================
// Mock Backends Bundle
// =============================================================================

/// All mocks together, with typed access for assertions.
pub struct MockBackends {
    pub model: Arc<MockModelInvoker>,
    pub function: Arc<MockFunctionInvoker>,
    pub http: Arc<MockHttpGateway>,
    pub agent: Arc<MockConversationAgent>,
    pub capture: Arc<StaticCapture>,
    pub extractor: Arc<StaticExtractor>,
}

impl MockBackends {
    pub fn new() -> Self {
        Self {
            model: Arc::new(MockModelInvoker::new()),
            function: Arc::new(MockFunctionInvoker::new()),
            http: Arc::new(MockHttpGateway::new()),
            agent: Arc::new(MockConversationAgent::new()),
            capture: Arc::new(StaticCapture::new(PcmBuffer::new(vec![0; 16_000]))),
            extractor: Arc::new(StaticExtractor::pages(Vec::<String>::new())),
        }
    }

    pub fn with_capture(mut self, capture: StaticCapture) -> Self {
        self.capture = Arc::new(capture);
        self
    }

    pub fn with_extractor(mut self, extractor: StaticExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Handle object backed by these mocks.
    pub fn clients(&self) -> ServiceClients {
        ServiceClients {
            model: self.model.clone(),
            function: self.function.clone(),
            http: self.http.clone(),
            agent: self.agent.clone(),
            capture: self.capture.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl Default for MockBackends {
    fn default() -> Self {
        Self::new()
    }
}
