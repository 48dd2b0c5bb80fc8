use async_trait::async_trait;
use bytes::Bytes;

use service_hub_core::{
    config::ConversationConfig,
    traits::UtteranceRequest,
    types::{AudioFormat, ConversationRequest, L16_CONTENT_TYPE},
    Error, Result, ServiceClients, ServiceResult,
};

use super::ServiceAdapter;
use crate::audio::decode_transcript;

/// Speech turn against the conversational agent under a fixed bot identity.
#[derive(Debug, Clone)]
pub struct ConversationAdapter {
    config: ConversationConfig,
    no_transcript: String,
}

impl ConversationAdapter {
    pub fn new(config: ConversationConfig, no_transcript: impl Into<String>) -> Self {
        Self {
            config,
            no_transcript: no_transcript.into(),
        }
    }

    fn utterance(&self, audio: Bytes) -> UtteranceRequest {
        UtteranceRequest {
            bot_id: self.config.bot_id.clone(),
            bot_alias_id: self.config.bot_alias_id.clone(),
            locale_id: self.config.locale_id.clone(),
            session_id: self.config.session_id.clone(),
            request_content_type: L16_CONTENT_TYPE.to_string(),
            response_content_type: AudioFormat::Mp3.mime_type().to_string(),
            audio,
        }
    }
}

#[async_trait]
impl ServiceAdapter for ConversationAdapter {
    type Request = ConversationRequest;

    fn name(&self) -> &'static str {
        "conversation"
    }

    fn failure_label(&self) -> &'static str {
        "Error processing audio with Lex"
    }

    async fn call(
        &self,
        request: &ConversationRequest,
        clients: &ServiceClients,
    ) -> Result<ServiceResult> {
        if request.audio.is_empty() {
            return Err(Error::capture("no audio was recorded"));
        }

        tracing::debug!(
            bot_id = %self.config.bot_id,
            session_id = %self.config.session_id,
            seconds = request.audio.duration_secs(),
            "Sending utterance"
        );

        let utterance = self.utterance(Bytes::from(request.audio.to_le_bytes()));
        let response = clients.agent.recognize_utterance(utterance).await?;

        let transcript = response
            .input_transcript
            .as_deref()
            .map(decode_transcript)
            .filter(|text| !text.is_empty());

        match response.audio_stream {
            Some(audio) if !audio.is_empty() => Ok(ServiceResult::Audio {
                data: audio.to_vec(),
                format: AudioFormat::Mp3,
                transcript,
            }),
            _ => Ok(ServiceResult::transcript(
                transcript.unwrap_or_else(|| self.no_transcript.clone()),
            )),
        }
    }
}
