//! Response envelope unwrapping.
//!
//! Some backends answer with JSON whose `body` field is itself a JSON-encoded
//! string. Each adapter declares how many encodings wrap its payload and the
//! normalizer peels exactly that many.

use serde_json::Value;

use service_hub_core::{Error, Result, ServiceResult};

/// Number of JSON encodings around a backend payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeDepth {
    /// The response body is the payload (model and agent responses).
    Single,
    /// The payload sits JSON-encoded in the `body` field (function and gateway responses).
    Double,
}

impl EnvelopeDepth {
    pub fn layers(&self) -> usize {
        match self {
            EnvelopeDepth::Single => 1,
            EnvelopeDepth::Double => 2,
        }
    }
}

/// Decode `layers` levels of JSON from a raw response body.
///
/// The first layer parses `raw`; each further layer parses the string held
/// in the previous layer's `body` field.
pub fn unwrap(raw: &[u8], layers: usize) -> Result<Value> {
    if layers == 0 {
        return Err(Error::parsing("envelope must have at least one layer"));
    }

    let mut value: Value = serde_json::from_slice(raw)
        .map_err(|e| Error::parsing(format!("layer 1 is not valid JSON: {}", e)))?;

    for layer in 2..=layers {
        let encoded = match value.get("body") {
            Some(Value::String(encoded)) => encoded,
            Some(_) => {
                return Err(Error::parsing(format!(
                    "layer {}: `body` is not a JSON-encoded string",
                    layer
                )))
            }
            None => return Err(Error::parsing(format!("layer {}: missing `body` field", layer))),
        };
        value = serde_json::from_str(encoded)
            .map_err(|e| Error::parsing(format!("layer {} is not valid JSON: {}", layer, e)))?;
    }

    Ok(value)
}

/// Declarative text extraction: envelope depth, field location, fallback.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    depth: EnvelopeDepth,
    /// JSON pointer to the payload field inside the innermost layer.
    pointer: &'static str,
    /// Text used when the field is absent or null.
    fallback: Option<String>,
}

impl ResponseNormalizer {
    pub fn new(depth: EnvelopeDepth, pointer: &'static str) -> Self {
        Self {
            depth,
            pointer,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Pull the string field out of a raw response.
    pub fn extract_text(&self, raw: &[u8]) -> Result<String> {
        let value = unwrap(raw, self.depth.layers())?;

        match value.pointer(self.pointer) {
            Some(Value::String(text)) => Ok(text.clone()),
            None | Some(Value::Null) => self.fallback.clone().ok_or_else(|| {
                Error::parsing(format!("response has no `{}` field", self.pointer))
            }),
            Some(other) => Err(Error::parsing(format!(
                "`{}` is not a string: {}",
                self.pointer, other
            ))),
        }
    }

    /// Normalize a raw response into a `Text` result.
    pub fn normalize(&self, raw: &[u8]) -> Result<ServiceResult> {
        self.extract_text(raw).map(ServiceResult::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_hub_core::ErrorKind;

    #[test]
    fn test_two_layer_summary_fixture() {
        let raw = br#"{"body": "{\"summary\":\"X\"}"}"#;

        let result = ResponseNormalizer::new(EnvelopeDepth::Double, "/summary")
            .normalize(raw)
            .unwrap();

        assert_eq!(result, ServiceResult::text("X"));
    }

    #[test]
    fn test_single_layer_pointer() {
        let raw = br#"{"content": [{"type": "text", "text": "Hi there"}]}"#;

        let text = ResponseNormalizer::new(EnvelopeDepth::Single, "/content/0/text")
            .extract_text(raw)
            .unwrap();

        assert_eq!(text, "Hi there");
    }

    #[test]
    fn test_missing_field_uses_fallback() {
        let raw = br#"{"body": "{\"other\":1}"}"#;

        let text = ResponseNormalizer::new(EnvelopeDepth::Double, "/translation")
            .with_fallback("Translation not found")
            .extract_text(raw)
            .unwrap();

        assert_eq!(text, "Translation not found");
    }

    #[test]
    fn test_missing_field_without_fallback_is_parsing_error() {
        let err = ResponseNormalizer::new(EnvelopeDepth::Single, "/content/0/text")
            .extract_text(br#"{"content": []}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parsing);
    }

    #[test]
    fn test_inner_layer_must_be_encoded_string() {
        let err = unwrap(br#"{"body": {"summary": "X"}}"#, 2).unwrap_err();
        assert!(err.to_string().contains("layer 2"));

        let err = unwrap(br#"{"body": "not json"}"#, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parsing);

        let err = unwrap(b"<html>", 1).unwrap_err();
        assert!(err.to_string().contains("layer 1"));
    }

    #[test]
    fn test_depths() {
        assert_eq!(EnvelopeDepth::Single.layers(), 1);
        assert_eq!(EnvelopeDepth::Double.layers(), 2);
        assert!(unwrap(b"{}", 0).is_err());
    }
}
