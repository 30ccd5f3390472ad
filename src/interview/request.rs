use crate::session::{Candidate, JobContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Which step of the interview a request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    StartInterview,
    CandidateResponse,
    EndInterview,
    UserFeedback,
    /// Any tag this service does not know
    #[serde(other)]
    Unrecognized,
}

/// Body of an interview request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub interview: InterviewDetails,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewDetails {
    pub state: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_background: Option<String>,
    /// Plain text, or an audio data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_response: Option<String>,
}

/// Caller identity plus the keys of an existing session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(rename = "localAccountId", default)]
    pub local_account_id: String,
    #[serde(rename = "userAgent", default)]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl InterviewRequest {
    pub fn candidate(&self) -> Candidate {
        Candidate {
            username: self.metadata.username.clone(),
            given_name: self.metadata.given_name.clone(),
            local_account_id: self.metadata.local_account_id.clone(),
            user_agent: self.metadata.user_agent.clone(),
        }
    }

    /// Job fields a `start_interview` request should carry but does not
    pub fn missing_job_fields(&self) -> Vec<&'static str> {
        let interview = &self.interview;
        [
            ("company", &interview.company),
            ("job_title", &interview.job_title),
            ("job_description", &interview.job_description),
            ("candidate_background", &interview.candidate_background),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Job context for the prompts. Absent fields become empty strings.
    pub fn job_context(&self) -> JobContext {
        let missing = self.missing_job_fields();
        if !missing.is_empty() {
            warn!(
                "Interview request is missing {}, prompts will use empty values",
                missing.join(", ")
            );
        }

        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        JobContext {
            company: field(&self.interview.company),
            job_title: field(&self.interview.job_title),
            job_description: field(&self.interview.job_description),
            candidate_background: field(&self.interview.candidate_background),
        }
    }
}
