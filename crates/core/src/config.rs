use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::types::{TranslationDirection, DEFAULT_MAX_CONTEXT_CHARS};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub aws: AwsConfig,
    pub services: ServicesConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// Upper bound on uploaded audio/document bodies.
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AwsConfig {
    pub region: String,
    /// Override endpoint, e.g. for a local emulator.
    pub endpoint_url: Option<String>,
}

/// Everything the dispatcher and its adapters need besides the clients.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ServicesConfig {
    pub model: ModelConfig,
    pub summary: SummaryConfig,
    pub translation: TranslationConfig,
    pub conversation: ConversationConfig,
    pub document: DocumentConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    pub text_model_id: String,
    pub image_model_id: String,
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub cfg_scale: u32,
    pub seed: u64,
    pub steps: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SummaryConfig {
    pub function_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub default_direction: TranslationDirection,
    pub api_key: Option<Secret<String>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConversationConfig {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentConfig {
    pub max_context_chars: usize,
}

/// Substitute payloads and fallback texts.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Used when "generate image" leaves nothing behind.
    pub image_prompt: String,
    /// Used when "summarize" leaves nothing behind.
    pub summary_text: String,
    /// Used when "translate" leaves nothing behind.
    pub translation_text: String,
    pub no_summary: String,
    pub no_translation: String,
    pub no_transcript: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    pub json_logs: bool,
    pub metrics_enabled: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("SERVICE_HUB_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__AWS__REGION=eu-west-1 to aws.region
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            enable_cors: true,
            max_body_bytes: 20 * 1024 * 1024, // 20MB
        }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".into(),
            endpoint_url: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text_model_id: "anthropic.claude-3-5-sonnet-20240620-v1:0".into(),
            image_model_id: "stability.stable-diffusion-xl-v1".into(),
            anthropic_version: "bedrock-2023-05-31".into(),
            max_tokens: 500,
            temperature: 0.7,
            cfg_scale: 10,
            seed: 42,
            steps: 50,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            function_name: "summarize_lambda".into(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://4tud9deny0.execute-api.us-east-1.amazonaws.com/translationstage".into(),
            default_direction: TranslationDirection::AutoEn,
            api_key: None,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            bot_id: "ZTEA8D6PJD".into(),
            bot_alias_id: "TSTALIASID".into(),
            locale_id: "en_US".into(),
            session_id: "streamlit-session".into(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            image_prompt: "A beautiful landscape".into(),
            summary_text: "Please provide text".into(),
            translation_text: "Hello world".into(),
            no_summary: "No summary returned".into(),
            no_translation: "Translation not found".into(),
            no_transcript: "No text recognized".into(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_contracts() {
        let config = AppConfig::default();
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.services.model.max_tokens, 500);
        assert_eq!(config.services.model.seed, 42);
        assert_eq!(config.services.model.steps, 50);
        assert_eq!(config.services.document.max_context_chars, 4000);
        assert_eq!(config.services.defaults.translation_text, "Hello world");
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[services.translation]\ndefault_direction = \"en-es\"\n\n[aws]\nregion = \"eu-west-1\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.services.translation.default_direction, TranslationDirection::EnEs);
        assert_eq!(config.services.summary.function_name, "summarize_lambda");
        assert_eq!(config.server.port, 3000);
    }
}
