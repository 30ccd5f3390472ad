use crate::interview::OrchestratorSettings;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub openai: OpenAiConfig,
    pub cosmos: CosmosConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub organization: Option<String>,
    /// Model used for interview turns
    pub chat_model: String,
    /// Model used for candidate audio
    pub transcription_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CosmosConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub database: String,
    /// Container new sessions are created in
    pub default_container: String,
}

impl Config {
    /// Load configuration from an optional file at `path` (any format the
    /// `config` crate recognises by extension), with credentials taken from
    /// `OPENAI_API_KEY`, `OPENAI_ORGANIZATION`, `COSMOS_ENDPOINT` and
    /// `COSMOS_KEY` when set.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "interview-gpt")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 7071_i64)?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.chat_model", "gpt-3.5-turbo")?
            .set_default("openai.transcription_model", "whisper-1")?
            .set_default("cosmos.database", "interviews")?
            .set_default("cosmos.default_container", "sessions")?
            .add_source(config::File::with_name(path).required(false))
            .set_override_option("openai.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option(
                "openai.organization",
                std::env::var("OPENAI_ORGANIZATION").ok(),
            )?
            .set_override_option("cosmos.endpoint", std::env::var("COSMOS_ENDPOINT").ok())?
            .set_override_option("cosmos.key", std::env::var("COSMOS_KEY").ok())?
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path))?;

        Ok(settings.try_deserialize()?)
    }

    pub fn openai_api_key(&self) -> Result<&str> {
        self.openai
            .api_key
            .as_deref()
            .context("OPENAI_API_KEY must be set")
    }

    /// Cosmos endpoint and master key, both required for the Cosmos store
    pub fn cosmos_credentials(&self) -> Result<(&str, &str)> {
        let endpoint = self
            .cosmos
            .endpoint
            .as_deref()
            .context("COSMOS_ENDPOINT must be set")?;
        let key = self
            .cosmos
            .key
            .as_deref()
            .context("COSMOS_KEY must be set")?;
        Ok((endpoint, key))
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            chat_model: self.openai.chat_model.clone(),
            transcription_model: self.openai.transcription_model.clone(),
            default_container: self.cosmos.default_container.clone(),
        }
    }
}
