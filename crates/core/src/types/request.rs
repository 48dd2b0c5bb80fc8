use serde::{Deserialize, Serialize};

use super::encoding::base64_bytes;
use crate::error::Error;

// =============================================================================
// Request Types
// =============================================================================

/// A single end-user action, in one of three modalities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modality", rename_all = "snake_case")]
pub enum UserRequest {
    /// Free text, classified into an intent before routing.
    Text {
        /// Raw text as typed by the user.
        body: String,
        /// Direction used if the text routes to translation.
        #[serde(default)]
        direction: TranslationDirection,
    },

    /// A short spoken utterance captured from the capture service.
    Audio {
        /// Recording length in seconds (1-10).
        duration_seconds: u8,
    },

    /// An uploaded document plus a question about it.
    Document {
        /// Raw PDF bytes.
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
        /// Question to answer from the document.
        question: String,
    },
}

impl UserRequest {
    /// Create a text request with the default translation direction.
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text {
            body: body.into(),
            direction: TranslationDirection::default(),
        }
    }

    /// Create a text request with an explicit translation direction.
    pub fn text_with_direction(body: impl Into<String>, direction: TranslationDirection) -> Self {
        Self::Text {
            body: body.into(),
            direction,
        }
    }

    /// Create an audio request.
    pub fn audio(duration_seconds: u8) -> Self {
        Self::Audio { duration_seconds }
    }

    /// Create a document question request.
    pub fn document(bytes: impl Into<Vec<u8>>, question: impl Into<String>) -> Self {
        Self::Document {
            bytes: bytes.into(),
            question: question.into(),
        }
    }

    /// The modality of this request.
    pub fn modality(&self) -> Modality {
        match self {
            UserRequest::Text { .. } => Modality::Text,
            UserRequest::Audio { .. } => Modality::Audio,
            UserRequest::Document { .. } => Modality::Document,
        }
    }
}

/// Input modality of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Audio,
    Document,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Audio => "audio",
            Modality::Document => "document",
        }
    }
}

// =============================================================================
// Translation Direction
// =============================================================================

/// Language pair accepted by the translation gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TranslationDirection {
    #[default]
    #[serde(rename = "auto-en")]
    AutoEn,
    #[serde(rename = "en-hi")]
    EnHi,
    #[serde(rename = "hi-en")]
    HiEn,
    #[serde(rename = "en-es")]
    EnEs,
    #[serde(rename = "es-en")]
    EsEn,
}

impl TranslationDirection {
    /// Every direction the gateway understands, in display order.
    pub const ALL: [TranslationDirection; 5] = [
        TranslationDirection::AutoEn,
        TranslationDirection::EnHi,
        TranslationDirection::HiEn,
        TranslationDirection::EnEs,
        TranslationDirection::EsEn,
    ];

    /// Wire value sent to the gateway.
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationDirection::AutoEn => "auto-en",
            TranslationDirection::EnHi => "en-hi",
            TranslationDirection::HiEn => "hi-en",
            TranslationDirection::EnEs => "en-es",
            TranslationDirection::EsEn => "es-en",
        }
    }
}

impl std::fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TranslationDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_request(format!("Unknown translation direction: {}", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trips_through_wire_value() {
        for direction in TranslationDirection::ALL {
            let parsed: TranslationDirection = direction.as_str().parse().unwrap();
            assert_eq!(parsed, direction);
        }
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let err = "fr-en".parse::<TranslationDirection>().unwrap_err();
        assert!(err.to_string().contains("fr-en"));
    }

    #[test]
    fn test_text_request_defaults_to_auto_en() {
        let json = r#"{"modality":"text","body":"hello"}"#;
        let request: UserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, UserRequest::text("hello"));
        assert_eq!(request.modality(), Modality::Text);
    }

    #[test]
    fn test_document_bytes_are_base64_on_the_wire() {
        let request = UserRequest::document(b"%PDF".to_vec(), "What?");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["bytes"], "JVBERg==");
        assert_eq!(value["modality"], "document");
    }
}
