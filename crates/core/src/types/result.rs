use serde::{Deserialize, Serialize};

use super::encoding::base64_bytes;
use crate::error::{Error, ErrorKind};

// =============================================================================
// Result Types
// =============================================================================

/// Uniform outcome of a dispatch, rendered by the caller.
///
/// A `Failure` is an ordinary value: adapters and the dispatcher never let a
/// backend error escape as anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceResult {
    /// Generated or transformed text.
    Text { text: String },

    /// A generated image.
    Image {
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
        format: ImageFormat,
    },

    /// Spoken response audio, with the recognized input when available.
    Audio {
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
        format: AudioFormat,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transcript: Option<String>,
    },

    /// Recognized speech without response audio.
    Transcript { text: String },

    /// A contained failure with a human-readable message.
    Failure { kind: ErrorKind, message: String },
}

impl ServiceResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn transcript(text: impl Into<String>) -> Self {
        Self::Transcript { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Convert an error into a labeled failure, e.g. "Error calling Lambda: ...".
    pub fn from_error(label: &str, error: &Error) -> Self {
        Self::failure(error.kind(), format!("{}: {}", label, error))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ServiceResult::Failure { .. })
    }

    /// Text payload of a `Text` or `Transcript` result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ServiceResult::Text { text } | ServiceResult::Transcript { text } => Some(text),
            _ => None,
        }
    }

    /// Metrics label for the variant.
    pub fn outcome(&self) -> &'static str {
        match self {
            ServiceResult::Text { .. } => "text",
            ServiceResult::Image { .. } => "image",
            ServiceResult::Audio { .. } => "audio",
            ServiceResult::Transcript { .. } => "transcript",
            ServiceResult::Failure { .. } => "failure",
        }
    }
}

// =============================================================================
// Media Formats
// =============================================================================

/// Encoding of an image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Unknown,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Unknown => "application/octet-stream",
        }
    }
}

/// Encoding of an audio payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    /// Raw little-endian 16-bit PCM, mono, 16 kHz.
    Pcm16,
}

impl AudioFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Pcm16 => super::media::L16_CONTENT_TYPE,
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Pcm16 => "pcm",
        }
    }

    /// Detect a container format from magic bytes. Raw PCM has none.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        if data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WAVE" {
            return Some(AudioFormat::Wav);
        }
        if data.starts_with(b"OggS") {
            return Some(AudioFormat::Ogg);
        }
        if data.starts_with(b"ID3") || data.starts_with(&[0xFF, 0xFB]) || data.starts_with(&[0xFF, 0xFA]) {
            return Some(AudioFormat::Mp3);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_from_error_is_labeled() {
        let result = ServiceResult::from_error("Error calling API Gateway", &Error::transport(404));
        match result {
            ServiceResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Transport);
                assert!(message.starts_with("Error calling API Gateway"));
                assert!(message.contains("404"));
            }
            other => panic!("Expected Failure, got {:?}", other),
        }
    }

    #[test]
    fn test_result_wire_shape() {
        let value = serde_json::to_value(ServiceResult::text("hi")).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["text"], "hi");

        let image = ServiceResult::Image {
            data: vec![1, 2, 3],
            format: ImageFormat::Png,
        };
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["data"], "AQID");
        assert_eq!(value["format"], "png");
    }

    #[test]
    fn test_audio_format_detection() {
        let wav = b"RIFF\x00\x00\x00\x00WAVEfmt ";
        assert_eq!(AudioFormat::detect(wav), Some(AudioFormat::Wav));

        let ogg = b"OggS\x00\x02";
        assert_eq!(AudioFormat::detect(ogg), Some(AudioFormat::Ogg));

        let mp3 = &[0xFF, 0xFB, 0x90, 0x00];
        assert_eq!(AudioFormat::detect(mp3), Some(AudioFormat::Mp3));

        assert_eq!(AudioFormat::detect(&[0x01, 0x00, 0x02, 0x00]), None);
    }

    #[test]
    fn test_audio_format_mime_type() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Pcm16.mime_type(), "audio/l16; rate=16000; channels=1");
    }
}
