//! Intent classifier for free-text requests.

use regex::{Regex, RegexBuilder};

use service_hub_core::{config::DefaultsConfig, Classification, Intent};

/// Keyword classifier with a fixed, total priority order.
///
/// Marker phrases are matched case-insensitively anywhere in the text; the
/// first intent in [`Intent::BY_PRIORITY`] whose marker occurs wins, and text
/// matching no marker is `GenericGenerate`.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    /// Marker patterns, highest priority first.
    markers: Vec<(Intent, Regex)>,
    /// Substitute payloads for markers that leave nothing behind.
    defaults: DefaultsConfig,
}

impl KeywordClassifier {
    /// Create a classifier with the given default residuals.
    pub fn new(defaults: DefaultsConfig) -> Self {
        let markers = Intent::BY_PRIORITY
            .into_iter()
            .filter_map(|intent| intent.marker().map(|marker| (intent, marker)))
            .filter_map(|(intent, marker)| {
                // Escaped literals always compile.
                RegexBuilder::new(&regex::escape(marker))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|pattern| (intent, pattern))
            })
            .collect();

        Self { markers, defaults }
    }

    /// Pick the intent for `text`. Never fails.
    pub fn detect_intent(&self, text: &str) -> Intent {
        self.markers
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::GenericGenerate)
    }

    /// Payload left for the adapter once `intent`'s marker is removed.
    ///
    /// `GenericGenerate` keeps the text as is. For marker intents every
    /// occurrence of the marker is removed, surrounding `:` and whitespace are
    /// stripped, and an empty remainder becomes the configured default.
    pub fn extract_payload(&self, text: &str, intent: Intent) -> String {
        let Some(pattern) = self.pattern_for(intent) else {
            return text.to_string();
        };

        let stripped = pattern.replace_all(text, "");
        let residual = stripped.trim_matches(|c: char| c == ':' || c.is_whitespace());

        if residual.is_empty() {
            self.default_residual(intent).to_string()
        } else {
            residual.to_string()
        }
    }

    /// Detect the intent and extract its payload in one call.
    pub fn classify(&self, text: &str) -> Classification {
        let intent = self.detect_intent(text);
        let residual = self.extract_payload(text, intent);

        tracing::debug!(
            intent = %intent,
            text_length = text.len(),
            residual_length = residual.len(),
            "Classified text request"
        );

        Classification { intent, residual }
    }

    fn pattern_for(&self, intent: Intent) -> Option<&Regex> {
        self.markers
            .iter()
            .find(|(candidate, _)| *candidate == intent)
            .map(|(_, pattern)| pattern)
    }

    fn default_residual(&self, intent: Intent) -> &str {
        match intent {
            Intent::GenerateImage => &self.defaults.image_prompt,
            Intent::Summarize => &self.defaults.summary_text,
            Intent::Translate => &self.defaults.translation_text,
            Intent::GenericGenerate => "",
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DefaultsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_with_separator() {
        let classifier = KeywordClassifier::default();

        let result = classifier.classify("summarize: The quick brown fox");

        assert_eq!(result.intent, Intent::Summarize);
        assert_eq!(result.residual, "The quick brown fox");
    }

    #[test]
    fn test_image_marker_wins_over_everything() {
        let classifier = KeywordClassifier::default();

        let result = classifier.classify("Translate and summarize this, then GENERATE IMAGE of a cat");

        assert_eq!(result.intent, Intent::GenerateImage);
        assert_eq!(result.residual, "Translate and summarize this, then  of a cat");
    }

    #[test]
    fn test_summarize_beats_translate() {
        let classifier = KeywordClassifier::default();
        assert_eq!(
            classifier.detect_intent("translate this and summarize it"),
            Intent::Summarize
        );
    }

    #[test]
    fn test_marker_removed_case_insensitively() {
        let classifier = KeywordClassifier::default();

        let result = classifier.classify("Translate: Buenos dias");

        assert_eq!(result.intent, Intent::Translate);
        assert_eq!(result.residual, "Buenos dias");
    }

    #[test]
    fn test_empty_residual_uses_defaults() {
        let classifier = KeywordClassifier::default();

        assert_eq!(classifier.classify("generate image").residual, "A beautiful landscape");
        assert_eq!(classifier.classify("Summarize:").residual, "Please provide text");
        assert_eq!(classifier.classify("  translate : ").residual, "Hello world");
    }

    #[test]
    fn test_forced_intent_on_empty_text() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.extract_payload("", Intent::Translate), "Hello world");
    }

    #[test]
    fn test_generic_keeps_original_text() {
        let classifier = KeywordClassifier::default();

        let result = classifier.classify("  Write a haiku about rust:  ");
        assert_eq!(result.intent, Intent::GenericGenerate);
        assert_eq!(result.residual, "  Write a haiku about rust:  ");

        let empty = classifier.classify("");
        assert_eq!(empty.intent, Intent::GenericGenerate);
        assert_eq!(empty.residual, "");
    }

    #[test]
    fn test_configured_defaults() {
        let classifier = KeywordClassifier::new(DefaultsConfig {
            image_prompt: "A lighthouse at dusk".into(),
            ..DefaultsConfig::default()
        });

        assert_eq!(classifier.classify("generate image:").residual, "A lighthouse at dusk");
    }
}
