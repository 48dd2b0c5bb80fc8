//! Local collaborator traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CaptureDuration, PcmBuffer};

/// Produces one utterance of PCM16 mono 16 kHz audio.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Record for `duration`, returning only once the recording is complete.
    async fn capture(&self, duration: CaptureDuration) -> Result<PcmBuffer>;
}

/// Extracts per-page text from an uploaded document.
pub trait DocumentExtractor: Send + Sync {
    /// Text of each page in order. Pages without text yield an empty string.
    fn extract_pages(&self, document: &[u8]) -> Result<Vec<String>>;
}
