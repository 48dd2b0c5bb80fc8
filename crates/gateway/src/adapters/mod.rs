//! Service adapters, one per backend.
//!
//! An adapter turns a typed request into its backend's wire contract, makes
//! the call, and normalizes the response. [`ServiceAdapter::call`] reports
//! problems as `Err`; [`ServiceAdapter::invoke`] is the boundary that turns
//! them into a labeled `Failure`.

mod conversation;
mod document_qa;
mod model_image;
mod model_text;
mod summary;
mod translation;

pub use conversation::ConversationAdapter;
pub use document_qa::{document_prompt, DocumentQaAdapter};
pub use model_image::ModelImageAdapter;
pub use model_text::ModelTextAdapter;
pub use summary::SummaryAdapter;
pub use translation::TranslationAdapter;

use std::time::Instant;

use async_trait::async_trait;

use service_hub_core::{Result, ServiceClients, ServiceResult};
use service_hub_telemetry::track_adapter;

/// A backend reached through one of the [`ServiceClients`] handles.
#[async_trait]
pub trait ServiceAdapter: Send + Sync {
    type Request: Send + Sync;

    /// Adapter name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Prefix of every failure message this adapter produces.
    fn failure_label(&self) -> &'static str;

    /// Make the backend call and normalize its response.
    async fn call(&self, request: &Self::Request, clients: &ServiceClients) -> Result<ServiceResult>;

    /// Call the backend, containing any error as a `Failure`.
    async fn invoke(&self, request: &Self::Request, clients: &ServiceClients) -> ServiceResult {
        let start = Instant::now();

        let result = match self.call(request, clients).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    adapter = self.name(),
                    kind = %e.kind(),
                    error = %e,
                    "Adapter call failed"
                );
                ServiceResult::from_error(self.failure_label(), &e)
            }
        };

        track_adapter(self.name(), result.outcome(), start.elapsed().as_secs_f64());
        result
    }
}
