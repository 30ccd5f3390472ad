use super::messages::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, TranscriptionResponse,
};
use super::{ChatCompleter, Transcriber};
use crate::session::Message;
use anyhow::{bail, Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use std::path::Path;
use tracing::{debug, info};

/// OpenAI REST client for chat completions and Whisper transcription
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    organization: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: String, organization: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            organization,
        }
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .bearer_auth(&self.api_key);
        if let Some(org) = &self.organization {
            request = request.header("OpenAI-Organization", org);
        }
        request
    }

    /// Turn a non-success response into an error carrying the API message
    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => bail!(
                "OpenAI {} failed ({}, {}): {}",
                what,
                status,
                err.error.error_type.as_deref().unwrap_or("unknown error"),
                err.error.message
            ),
            Err(_) => bail!("OpenAI {} failed ({}): {}", what, status, body),
        }
    }
}

#[async_trait::async_trait]
impl ChatCompleter for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<Message> {
        info!(
            "Requesting chat completion ({} messages, model {})",
            messages.len(),
            model
        );

        let response = self
            .post("chat/completions")
            .json(&ChatCompletionRequest { model, messages })
            .send()
            .await
            .context("Chat completion request failed")?;

        let completion = Self::check(response, "chat completion")
            .await?
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat completion")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .context("Chat completion returned no choices")
    }
}

#[async_trait::async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, audio: &Path, model: &str) -> Result<String> {
        let bytes = tokio::fs::read(audio)
            .await
            .with_context(|| format!("Failed to read audio file {}", audio.display()))?;
        let file_name = audio
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        info!(
            "Sending {} bytes of audio to transcription (model {})",
            bytes.len(),
            model
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("model", model.to_string());

        let response = self
            .post("audio/transcriptions")
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?;

        let transcription = Self::check(response, "transcription")
            .await?
            .json::<TranscriptionResponse>()
            .await
            .context("Failed to parse transcription")?;

        debug!("Transcribed: {}", transcription.text);

        Ok(transcription.text)
    }
}
