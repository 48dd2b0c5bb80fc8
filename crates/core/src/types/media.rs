//! Audio buffers exchanged with the capture service and the agent.

use std::io::Cursor;

use crate::error::{Error, Result};

/// Sample rate the conversational agent expects.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Content type of a raw PCM16 mono 16 kHz request body.
pub const L16_CONTENT_TYPE: &str = "audio/l16; rate=16000; channels=1";

/// Validated recording length for one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CaptureDuration(u8);

impl CaptureDuration {
    pub const MIN_SECONDS: u8 = 1;
    pub const MAX_SECONDS: u8 = 10;

    pub fn new(seconds: u8) -> Result<Self> {
        if (Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(Error::capture(format!(
                "recording duration must be between {} and {} seconds, got {}",
                Self::MIN_SECONDS,
                Self::MAX_SECONDS,
                seconds
            )))
        }
    }

    pub fn seconds(&self) -> u8 {
        self.0
    }

    /// Number of mono samples covering this duration.
    pub fn sample_count(&self) -> usize {
        self.0 as usize * SAMPLE_RATE_HZ as usize
    }
}

/// 16-bit signed PCM, mono, 16 kHz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Parse raw little-endian sample bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(Error::capture(format!(
                "PCM16 data must have an even length, got {} bytes",
                bytes.len()
            )));
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { samples })
    }

    /// Parse a RIFF/WAVE file holding 16-bit mono 16 kHz PCM.
    pub fn from_wav(bytes: &[u8]) -> Result<Self> {
        let reader = hound::WavReader::new(Cursor::new(bytes))
            .map_err(|e| Error::capture(format!("Failed to read WAV: {}", e)))?;

        let spec = reader.spec();
        if spec.channels != 1
            || spec.sample_rate != SAMPLE_RATE_HZ
            || spec.bits_per_sample != 16
            || spec.sample_format != hound::SampleFormat::Int
        {
            return Err(Error::capture(format!(
                "unsupported WAV layout: channels={} rate={} bits={} format={:?}",
                spec.channels, spec.sample_rate, spec.bits_per_sample, spec.sample_format
            )));
        }

        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::capture(format!("Failed to read WAV samples: {}", e)))?;
        Ok(Self { samples })
    }

    /// Little-endian byte representation sent to the agent.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    /// Keep at most `duration` worth of samples.
    pub fn truncate_to(&mut self, duration: CaptureDuration) {
        self.samples.truncate(duration.sample_count());
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / SAMPLE_RATE_HZ as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_with_rate(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut out = Vec::new();
        let mut writer = hound::WavWriter::new(Cursor::new(&mut out), spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        out
    }

    fn wav(samples: &[i16]) -> Vec<u8> {
        wav_with_rate(samples, SAMPLE_RATE_HZ)
    }

    #[test]
    fn test_duration_bounds() {
        assert!(CaptureDuration::new(0).is_err());
        assert!(CaptureDuration::new(11).is_err());
        assert_eq!(CaptureDuration::new(5).unwrap().sample_count(), 80_000);
    }

    #[test]
    fn test_wav_payload_extracted() {
        let buffer = PcmBuffer::from_wav(&wav(&[1, -2, 3])).unwrap();
        assert_eq!(buffer.samples(), &[1, -2, 3]);
        assert_eq!(buffer.to_le_bytes(), vec![1, 0, 0xFE, 0xFF, 3, 0]);
    }

    #[test]
    fn test_wav_wrong_rate_rejected() {
        let err = PcmBuffer::from_wav(&wav_with_rate(&[0, 0], 44_100)).unwrap_err();
        assert!(err.to_string().contains("rate=44100"));
    }

    #[test]
    fn test_truncated_wav_is_capture_error() {
        let mut bytes = wav(&[1, 2, 3]);
        bytes.truncate(20);
        let err = PcmBuffer::from_wav(&bytes).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Capture);
    }

    #[test]
    fn test_odd_pcm_rejected() {
        assert!(PcmBuffer::from_le_bytes(&[0, 1, 2]).is_err());
    }

    #[test]
    fn test_truncate_to_duration() {
        let mut buffer = PcmBuffer::new(vec![0; 40_000]);
        buffer.truncate_to(CaptureDuration::new(1).unwrap());
        assert_eq!(buffer.len(), 16_000);
        assert!((buffer.duration_secs() - 1.0).abs() < f32::EPSILON);
    }
}
