//! Request dispatch: classification, planning and adapter routing.
//!
//! The dispatcher owns one instance of every adapter, built from
//! configuration, and receives the client handles on each call. It keeps no
//! state between dispatches.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use tracing::Instrument;

use service_hub_core::{
    config::ServicesConfig,
    types::{
        AdapterRequest, CaptureDuration, ConversationRequest, DocumentContext, DocumentQuestion,
        ImagePrompt, Intent, Modality, PcmBuffer, SummaryRequest, TextPrompt, TranslationDirection,
        TranslationRequest, UserRequest,
    },
    Error, ErrorKind, Result, ServiceClients, ServiceResult,
};
use service_hub_telemetry::track_dispatch;

use crate::adapters::{
    ConversationAdapter, DocumentQaAdapter, ModelImageAdapter, ModelTextAdapter, ServiceAdapter,
    SummaryAdapter, TranslationAdapter,
};
use crate::classifier::KeywordClassifier;

/// Message for a text request with nothing in it.
pub const EMPTY_TEXT_MESSAGE: &str = "Enter some text first.";

/// Routes each [`UserRequest`] to exactly one adapter.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    classifier: KeywordClassifier,
    model_text: ModelTextAdapter,
    model_image: ModelImageAdapter,
    summary: SummaryAdapter,
    translation: TranslationAdapter,
    conversation: ConversationAdapter,
    document_qa: DocumentQaAdapter,
    default_direction: TranslationDirection,
    max_context_chars: usize,
}

impl Dispatcher {
    pub fn new(config: ServicesConfig) -> Self {
        let ServicesConfig {
            model,
            summary,
            translation,
            conversation,
            document,
            defaults,
        } = config;

        let model_text = ModelTextAdapter::new(model.clone());

        Self {
            model_image: ModelImageAdapter::new(model),
            document_qa: DocumentQaAdapter::new(model_text.clone()),
            model_text,
            summary: SummaryAdapter::new(summary, defaults.no_summary.clone()),
            default_direction: translation.default_direction,
            translation: TranslationAdapter::new(translation, defaults.no_translation.clone()),
            conversation: ConversationAdapter::new(conversation, defaults.no_transcript.clone()),
            max_context_chars: document.max_context_chars,
            classifier: KeywordClassifier::new(defaults),
        }
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    /// Direction used when a caller does not choose one.
    pub fn default_direction(&self) -> TranslationDirection {
        self.default_direction
    }

    /// Handle one request end to end. Always returns a result; backend
    /// errors and panics come back as `Failure`.
    pub async fn dispatch(&self, request: &UserRequest, clients: &ServiceClients) -> ServiceResult {
        self.guarded(request.modality(), self.route(request, clients)).await
    }

    /// Route text under a caller-chosen intent instead of classifying it.
    pub async fn dispatch_intent(
        &self,
        text: &str,
        intent: Intent,
        direction: TranslationDirection,
        clients: &ServiceClients,
    ) -> ServiceResult {
        let plan = self.plan_text(text, intent, direction);
        self.guarded(Modality::Text, self.execute(&plan, clients)).await
    }

    /// Adapter request for `text` under `intent`.
    ///
    /// Marker intents get the extracted payload; generic generation gets the
    /// whole original text.
    pub fn plan_text(&self, text: &str, intent: Intent, direction: TranslationDirection) -> AdapterRequest {
        match intent {
            Intent::GenerateImage => AdapterRequest::ModelImage(ImagePrompt {
                prompt: self.classifier.extract_payload(text, intent),
            }),
            Intent::Summarize => AdapterRequest::Summary(SummaryRequest {
                text: self.classifier.extract_payload(text, intent),
            }),
            Intent::Translate => AdapterRequest::Translation(TranslationRequest {
                text: self.classifier.extract_payload(text, intent),
                direction,
            }),
            Intent::GenericGenerate => AdapterRequest::ModelText(TextPrompt {
                prompt: text.to_string(),
            }),
        }
    }

    /// Adapter request for a question over extracted page texts.
    pub fn plan_document(&self, pages: &[String], question: &str) -> AdapterRequest {
        AdapterRequest::DocumentQa(DocumentQuestion {
            context: DocumentContext::from_pages(pages, self.max_context_chars),
            question: question.to_string(),
        })
    }

    /// Invoke the adapter matching `request`.
    pub async fn execute(&self, request: &AdapterRequest, clients: &ServiceClients) -> ServiceResult {
        tracing::debug!(adapter = request.adapter_name(), "Invoking adapter");

        match request {
            AdapterRequest::ModelText(prompt) => self.model_text.invoke(prompt, clients).await,
            AdapterRequest::ModelImage(prompt) => self.model_image.invoke(prompt, clients).await,
            AdapterRequest::Summary(summary) => self.summary.invoke(summary, clients).await,
            AdapterRequest::Translation(translation) => {
                self.translation.invoke(translation, clients).await
            }
            AdapterRequest::Conversation(utterance) => {
                self.conversation.invoke(utterance, clients).await
            }
            AdapterRequest::DocumentQa(question) => self.document_qa.invoke(question, clients).await,
        }
    }

    async fn route(&self, request: &UserRequest, clients: &ServiceClients) -> ServiceResult {
        match request {
            UserRequest::Text { body, direction } => {
                if body.trim().is_empty() {
                    return ServiceResult::failure(ErrorKind::InvalidRequest, EMPTY_TEXT_MESSAGE);
                }

                let intent = self.classifier.detect_intent(body);
                tracing::info!(intent = %intent, "Text request classified");

                let plan = self.plan_text(body, intent, *direction);
                self.execute(&plan, clients).await
            }
            UserRequest::Audio { duration_seconds } => {
                match self.record(*duration_seconds, clients).await {
                    Ok(audio) => {
                        let plan = AdapterRequest::Conversation(ConversationRequest { audio });
                        self.execute(&plan, clients).await
                    }
                    Err(e) => ServiceResult::from_error("Error capturing audio", &e),
                }
            }
            UserRequest::Document { bytes, question } => {
                if let Err(e) = validate_document(bytes, question) {
                    return ServiceResult::from_error("Error processing PDF", &e);
                }

                match self.extract(bytes, clients).await {
                    Ok(pages) => {
                        let plan = self.plan_document(&pages, question);
                        self.execute(&plan, clients).await
                    }
                    Err(e) => ServiceResult::from_error("Error processing PDF", &e),
                }
            }
        }
    }

    async fn record(
        &self,
        duration_seconds: u8,
        clients: &ServiceClients,
    ) -> Result<PcmBuffer> {
        let duration = CaptureDuration::new(duration_seconds)?;
        tracing::debug!(seconds = duration.seconds(), "Capturing audio");
        clients.capture.capture(duration).await
    }

    async fn extract(&self, bytes: &[u8], clients: &ServiceClients) -> Result<Vec<String>> {
        let extractor = clients.extractor.clone();
        let document = bytes.to_vec();

        tokio::task::spawn_blocking(move || extractor.extract_pages(&document))
            .await
            .map_err(|e| Error::internal(format!("Document extraction task failed: {}", e)))?
    }

    async fn guarded<F>(&self, modality: Modality, work: F) -> ServiceResult
    where
        F: Future<Output = ServiceResult>,
    {
        let start = Instant::now();
        let span = tracing::info_span!("dispatch", modality = modality.as_str());

        let result = AssertUnwindSafe(work)
            .catch_unwind()
            .instrument(span)
            .await
            .unwrap_or_else(|panic| {
                let message = panic_message(&*panic);
                tracing::error!(modality = modality.as_str(), panic = %message, "Dispatch panicked");
                ServiceResult::failure(ErrorKind::Internal, format!("Internal error: {}", message))
            });

        track_dispatch(modality.as_str(), result.outcome(), start.elapsed().as_secs_f64());
        result
    }
}

fn validate_document(bytes: &[u8], question: &str) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::invalid_request("Upload a PDF first."));
    }
    if question.trim().is_empty() {
        return Err(Error::invalid_request("Enter a question about the document."));
    }
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
