//! Audio helpers for the conversation path.
//!
//! This module provides a capture service backed by an uploaded recording
//! and decoding of the agent's transcript header.

use std::io::Read;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::read::GzDecoder;

use service_hub_core::{
    traits::AudioCapture,
    types::{AudioFormat, CaptureDuration, PcmBuffer},
    Error, Result,
};

/// Capture service that serves a recording made elsewhere.
///
/// Each capture returns at most the requested duration from the start of
/// the recording.
#[derive(Debug, Clone, Default)]
pub struct BufferedCapture {
    recording: PcmBuffer,
}

impl BufferedCapture {
    /// Wrap an already-decoded recording.
    pub fn new(recording: PcmBuffer) -> Self {
        Self { recording }
    }

    /// Accept an uploaded WAV file or raw PCM16 mono 16 kHz bytes.
    ///
    /// Raw PCM has no header and may begin with any byte pattern, so only a
    /// RIFF/WAVE header selects the WAV decoder.
    pub fn from_upload(data: &[u8]) -> Result<Self> {
        let recording = match AudioFormat::detect(data) {
            Some(AudioFormat::Wav) => PcmBuffer::from_wav(data)?,
            _ => PcmBuffer::from_le_bytes(data)?,
        };

        tracing::debug!(
            samples = recording.len(),
            seconds = recording.duration_secs(),
            "Audio upload decoded"
        );

        Ok(Self { recording })
    }
}

#[async_trait]
impl AudioCapture for BufferedCapture {
    async fn capture(&self, duration: CaptureDuration) -> Result<PcmBuffer> {
        if self.recording.is_empty() {
            return Err(Error::capture("no audio was recorded"));
        }

        let mut buffer = self.recording.clone();
        buffer.truncate_to(duration);
        Ok(buffer)
    }
}

/// Decode the agent's transcript header.
///
/// The service sends the transcript gzip-compressed and base64-encoded,
/// holding a JSON string. Anything that does not decode that way is taken
/// as plain text.
pub fn decode_transcript(header: &str) -> String {
    let decoded = STANDARD
        .decode(header.trim())
        .ok()
        .and_then(|compressed| {
            let mut text = String::new();
            GzDecoder::new(compressed.as_slice())
                .read_to_string(&mut text)
                .ok()
                .map(|_| text)
        });

    match decoded {
        Some(text) => serde_json::from_str::<String>(&text).unwrap_or(text),
        None => header.to_string(),
    }
}
