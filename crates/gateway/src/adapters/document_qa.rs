use async_trait::async_trait;

use service_hub_core::{
    types::{DocumentQuestion, TextPrompt},
    Result, ServiceClients, ServiceResult,
};

use super::{ModelTextAdapter, ServiceAdapter};

/// Prompt embedding a (truncated) document and a question about it.
pub fn document_prompt(document: &str, question: &str) -> String {
    format!(
        "Here is a document: {}. Now answer the question: {}",
        document, question
    )
}

/// Question answering over an uploaded document, via the text model.
#[derive(Debug, Clone)]
pub struct DocumentQaAdapter {
    model: ModelTextAdapter,
}

impl DocumentQaAdapter {
    pub fn new(model: ModelTextAdapter) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ServiceAdapter for DocumentQaAdapter {
    type Request = DocumentQuestion;

    fn name(&self) -> &'static str {
        "document_qa"
    }

    fn failure_label(&self) -> &'static str {
        "Error processing PDF"
    }

    async fn call(&self, request: &DocumentQuestion, clients: &ServiceClients) -> Result<ServiceResult> {
        if request.context.is_truncated() {
            tracing::debug!(
                source_chars = request.context.source_chars(),
                "Document text truncated for prompt"
            );
        }

        let prompt = TextPrompt {
            prompt: document_prompt(request.context.text(), &request.question),
        };

        self.model.call(&prompt, clients).await
    }
}
