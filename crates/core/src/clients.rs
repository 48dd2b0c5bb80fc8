//! The handle object passed into every dispatch.

use std::sync::Arc;

use crate::traits::{
    AudioCapture, ConversationAgent, DocumentExtractor, FunctionInvoker, HttpGateway, ModelInvoker,
};

/// Pre-authenticated handles to every external collaborator.
///
/// Constructed once by the caller and shared read-only; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct ServiceClients {
    pub model: Arc<dyn ModelInvoker>,
    pub function: Arc<dyn FunctionInvoker>,
    pub http: Arc<dyn HttpGateway>,
    pub agent: Arc<dyn ConversationAgent>,
    pub capture: Arc<dyn AudioCapture>,
    pub extractor: Arc<dyn DocumentExtractor>,
}

impl ServiceClients {
    /// Replace the capture service, e.g. with a per-request upload.
    pub fn with_capture(mut self, capture: Arc<dyn AudioCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// Replace the document extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }
}

impl std::fmt::Debug for ServiceClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClients").finish_non_exhaustive()
    }
}
