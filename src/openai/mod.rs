//! Language model collaborators
//!
//! The orchestrator talks to two seams:
//! - `ChatCompleter` - produces the interviewer's next turn from the transcript
//! - `Transcriber` - turns candidate audio into text
//!
//! `OpenAiClient` implements both against the OpenAI REST API.

mod client;
mod messages;

pub use client::OpenAiClient;
pub use messages::{ChatCompletionRequest, ChatCompletionResponse, TranscriptionResponse};

use crate::session::Message;
use anyhow::Result;
use std::path::Path;

#[async_trait::async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Next assistant message for the given transcript
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<Message>;
}

#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &Path, model: &str) -> Result<String>;
}
