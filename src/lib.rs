pub mod audio;
pub mod config;
pub mod http;
pub mod interview;
pub mod openai;
pub mod session;
pub mod store;

pub use audio::{AudioClip, AudioFile, AudioFormat, CandidateInput};
pub use config::Config;
pub use http::{create_router, AppState};
pub use interview::{
    InterviewRequest, InterviewResponse, Orchestrator, OrchestratorSettings, Phase, ResponseState,
};
pub use openai::{ChatCompleter, OpenAiClient, Transcriber};
pub use session::{Message, Role, Session};
pub use store::{CosmosStore, MemoryStore, SessionStore, StoreError};
