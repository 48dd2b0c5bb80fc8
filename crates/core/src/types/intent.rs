use serde::{Deserialize, Serialize};

// =============================================================================
// Intent Types (classifier output)
// =============================================================================

/// Purpose of a free-text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    GenerateImage,
    Summarize,
    Translate,
    GenericGenerate,
}

impl Intent {
    /// Intents that are selected by a marker phrase, highest priority first.
    pub const BY_PRIORITY: [Intent; 3] = [Intent::GenerateImage, Intent::Summarize, Intent::Translate];

    /// Marker phrase that selects this intent.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Intent::GenerateImage => Some("generate image"),
            Intent::Summarize => Some("summarize"),
            Intent::Translate => Some("translate"),
            Intent::GenericGenerate => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::GenerateImage => "generate_image",
            Intent::Summarize => "summarize",
            Intent::Translate => "translate",
            Intent::GenericGenerate => "generic_generate",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output: the chosen intent and the payload left for the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    pub residual: String,
}
