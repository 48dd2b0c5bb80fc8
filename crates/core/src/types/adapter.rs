use serde::{Deserialize, Serialize};

use super::media::PcmBuffer;
use super::request::TranslationDirection;

// =============================================================================
// Adapter Request Types
// =============================================================================

/// Default bound on document text embedded into a prompt, in characters.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 4000;

/// Prompt for the text model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub prompt: String,
}

/// Prompt for the image model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub prompt: String,
}

/// Text handed to the summarization function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
}

/// Text and language pair for the translation gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub direction: TranslationDirection,
}

/// One captured utterance for the conversational agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRequest {
    pub audio: PcmBuffer,
}

/// Extracted document text and the question asked about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuestion {
    pub context: DocumentContext,
    pub question: String,
}

/// Typed payload for exactly one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterRequest {
    ModelText(TextPrompt),
    ModelImage(ImagePrompt),
    Summary(SummaryRequest),
    Translation(TranslationRequest),
    Conversation(ConversationRequest),
    DocumentQa(DocumentQuestion),
}

impl AdapterRequest {
    /// Name of the adapter that serves this request.
    pub fn adapter_name(&self) -> &'static str {
        match self {
            AdapterRequest::ModelText(_) => "model_text",
            AdapterRequest::ModelImage(_) => "model_image",
            AdapterRequest::Summary(_) => "summary",
            AdapterRequest::Translation(_) => "translation",
            AdapterRequest::Conversation(_) => "conversation",
            AdapterRequest::DocumentQa(_) => "document_qa",
        }
    }
}

// =============================================================================
// Document Context
// =============================================================================

/// Page text of one uploaded document, bounded for prompt embedding.
///
/// Lives for a single document request only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    text: String,
    /// Character count before truncation.
    source_chars: usize,
}

impl DocumentContext {
    /// Join non-empty pages with newlines and keep the first `max_chars` characters.
    pub fn from_pages<I, S>(pages: I, max_chars: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = pages
            .into_iter()
            .filter(|page| !page.as_ref().is_empty())
            .map(|page| page.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(joined, max_chars)
    }

    /// Bound already-joined text to `max_chars` characters.
    pub fn from_text(text: impl Into<String>, max_chars: usize) -> Self {
        let mut text = text.into();
        let source_chars = text.chars().count();
        if let Some((cut, _)) = text.char_indices().nth(max_chars) {
            text.truncate(cut);
        }
        Self { text, source_chars }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_chars(&self) -> usize {
        self.source_chars
    }

    pub fn is_truncated(&self) -> bool {
        self.source_chars > self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pages_skipped() {
        let context = DocumentContext::from_pages(["first", "", "third"], DEFAULT_MAX_CONTEXT_CHARS);
        assert_eq!(context.text(), "first\nthird");
        assert!(!context.is_truncated());
    }

    #[test]
    fn test_whitespace_pages_kept_verbatim() {
        let context = DocumentContext::from_pages(["first\n", "  ", "third"], DEFAULT_MAX_CONTEXT_CHARS);
        assert_eq!(context.text(), "first\n\n  \nthird");
    }

    #[test]
    fn test_truncates_to_character_bound() {
        let text = "a".repeat(5000);
        let context = DocumentContext::from_text(text, DEFAULT_MAX_CONTEXT_CHARS);
        assert_eq!(context.text().len(), 4000);
        assert_eq!(context.source_chars(), 5000);
        assert!(context.is_truncated());
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let context = DocumentContext::from_text("éééé", 2);
        assert_eq!(context.text(), "éé");
    }
}
