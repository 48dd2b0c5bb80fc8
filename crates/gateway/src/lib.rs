//! Request routing for Service Hub.
//!
//! This crate turns a user request into exactly one backend call:
//! intent classification, the per-backend service adapters, response
//! envelope normalization, and the HTTP front that exposes the dispatcher.

pub mod adapters;
pub mod audio;
pub mod classifier;
pub mod dispatcher;
pub mod document;
pub mod normalizer;
pub mod server;
pub mod vision;

pub use adapters::{
    document_prompt, ConversationAdapter, DocumentQaAdapter, ModelImageAdapter, ModelTextAdapter,
    ServiceAdapter, SummaryAdapter, TranslationAdapter,
};
pub use audio::{decode_transcript, BufferedCapture};
pub use classifier::KeywordClassifier;
pub use dispatcher::Dispatcher;
pub use document::PdfTextExtractor;
pub use normalizer::{EnvelopeDepth, ResponseNormalizer};
pub use server::{GatewayServer, AppState};
pub use vision::{inspect_image, ImageInfo};
