//! Lex V2 implementation of ConversationAgent.

use async_trait::async_trait;
use aws_sdk_lexruntimev2::{error::DisplayErrorContext, primitives::ByteStream, Client};

use service_hub_core::{
    traits::{ConversationAgent, UtteranceRequest, UtteranceResponse},
    Error, Result,
};

/// Recognize-utterance calls against a Lex V2 bot.
#[derive(Debug, Clone)]
pub struct LexConversationAgent {
    client: Client,
}

impl LexConversationAgent {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConversationAgent for LexConversationAgent {
    async fn recognize_utterance(&self, request: UtteranceRequest) -> Result<UtteranceResponse> {
        let output = self
            .client
            .recognize_utterance()
            .bot_id(request.bot_id)
            .bot_alias_id(request.bot_alias_id)
            .locale_id(request.locale_id)
            .session_id(request.session_id)
            .request_content_type(request.request_content_type)
            .response_content_type(request.response_content_type)
            .input_stream(ByteStream::from(request.audio))
            .send()
            .await
            .map_err(|e| {
                Error::invocation(format!("Lex recognize_utterance error: {}", DisplayErrorContext(&e)))
            })?;

        let input_transcript = output.input_transcript().map(str::to_string);
        let content_type = output.content_type().map(str::to_string);

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|e| Error::invocation(format!("Lex audio stream read error: {}", e)))?
            .into_bytes();

        tracing::debug!(
            has_transcript = input_transcript.is_some(),
            audio_bytes = audio.len(),
            "Lex utterance recognized"
        );

        Ok(UtteranceResponse {
            input_transcript,
            audio_stream: (!audio.is_empty()).then_some(audio),
            content_type,
        })
    }
}
