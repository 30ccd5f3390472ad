use crate::session::Session;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    Success,
    Response,
    Invalid,
    InvalidAudioFileType,
}

/// Body returned for every handled request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_container: Option<String>,
    pub state: ResponseState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    /// Offending data URI prefix for `invalid_audio_file_type`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
}

impl InterviewResponse {
    fn bare(state: ResponseState) -> Self {
        Self {
            id: None,
            session_id: None,
            session_container: None,
            state,
            ai_response: None,
            type_tag: None,
        }
    }

    pub fn success() -> Self {
        Self::bare(ResponseState::Success)
    }

    pub fn invalid() -> Self {
        Self::bare(ResponseState::Invalid)
    }

    pub fn invalid_audio_file_type(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: Some(type_tag.into()),
            ..Self::bare(ResponseState::InvalidAudioFileType)
        }
    }

    /// Interviewer reply for a session
    pub fn reply(session: &Session, container: &str, ai_response: impl Into<String>) -> Self {
        Self {
            session_container: Some(container.to_string()),
            ..Self::closing(session, ai_response)
        }
    }

    /// Reply without a container, used when the interview ends early
    pub fn closing(session: &Session, ai_response: impl Into<String>) -> Self {
        Self {
            id: session.id.clone(),
            session_id: Some(session.session_id.clone()),
            ai_response: Some(ai_response.into()),
            ..Self::bare(ResponseState::Response)
        }
    }
}
