use super::prompts;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Who is being interviewed, as reported by the client at start
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub username: String,
    pub given_name: String,
    pub local_account_id: String,
    pub user_agent: String,
}

/// The role the candidate is practicing for
#[derive(Debug, Clone, Default)]
pub struct JobContext {
    pub company: String,
    pub job_title: String,
    pub job_description: String,
    pub candidate_background: String,
}

/// A persisted interview conversation
///
/// Serialized field names match the stored document layout, so existing
/// documents written by earlier clients load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Document key, assigned by the store on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique session identifier, also the partition key
    pub session_id: String,

    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(rename = "localAccountId", default)]
    pub local_account_id: String,
    #[serde(rename = "userAgent", default)]
    pub user_agent: String,

    /// Epoch milliseconds
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,

    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub candidate_background: String,

    /// Transcript in conversation order
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,

    /// Concurrency token of the stored revision
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl Session {
    /// Begin a new interview: fresh `session_id`, persona briefing and the
    /// candidate's kickoff message.
    pub fn start(candidate: Candidate, job: JobContext, start_time: i64) -> Self {
        let messages = vec![
            Message::system(prompts::system_prompt(&candidate, &job)),
            Message::user(prompts::kickoff_prompt(&candidate, &job)),
        ];

        Self {
            id: None,
            session_id: uuid::Uuid::new_v4().to_string(),
            username: candidate.username,
            given_name: candidate.given_name,
            local_account_id: candidate.local_account_id,
            user_agent: candidate.user_agent,
            start_time,
            end_time: None,
            company: job.company,
            job_title: job.job_title,
            job_description: job.job_description,
            candidate_background: job.candidate_background,
            messages,
            feedback: None,
            rating: None,
            etag: None,
        }
    }

    pub fn partition_key(&self) -> &str {
        &self.session_id
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn transcript_len(&self) -> usize {
        self.messages.len()
    }

    /// Mark the interview as over. The first end time sticks.
    pub fn end(&mut self, end_time: i64) {
        self.end_time.get_or_insert(end_time);
    }

    /// Replace any previous feedback; the transcript is left alone.
    pub fn attach_feedback(&mut self, feedback: Option<Value>, rating: Option<Value>) {
        self.feedback = feedback;
        self.rating = rating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            username: "ada@example.com".to_string(),
            given_name: "Ada".to_string(),
            local_account_id: "acct-1".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    fn job() -> JobContext {
        JobContext {
            company: "Contoso".to_string(),
            job_title: "Data Engineer".to_string(),
            job_description: "build pipelines".to_string(),
            candidate_background: "five years of SQL".to_string(),
        }
    }

    #[test]
    fn test_start_builds_briefing_and_kickoff() {
        let session = Session::start(candidate(), job(), 1_700_000_000_000);

        assert_eq!(session.transcript_len(), 2);
        assert_eq!(session.messages[0].role, Role::System);
        assert_eq!(session.messages[1].role, Role::User);
        assert!(session.id.is_none());
        assert!(session.end_time.is_none());
        assert!(!session.session_id.is_empty());
    }

    #[test]
    fn test_start_generates_distinct_session_ids() {
        let a = Session::start(candidate(), job(), 0);
        let b = Session::start(candidate(), job(), 0);

        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_document_field_names() {
        let mut session = Session::start(candidate(), job(), 42);
        session.id = Some("doc-1".to_string());
        session.etag = Some("\"0001\"".to_string());

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], "doc-1");
        assert_eq!(json["localAccountId"], "acct-1");
        assert_eq!(json["userAgent"], "test-agent");
        assert_eq!(json["start_time"], 42);
        assert_eq!(json["_etag"], "\"0001\"");
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json.get("end_time").is_none());
        assert!(json.get("feedback").is_none());
    }

    #[test]
    fn test_loads_stored_document_with_system_properties() {
        let json = r#"{
            "id": "doc-1",
            "session_id": "s-1",
            "username": "ada@example.com",
            "given_name": "Ada",
            "localAccountId": "acct-1",
            "userAgent": "test-agent",
            "start_time": 1,
            "company": "Contoso",
            "job_title": "Data Engineer",
            "job_description": "build pipelines",
            "candidate_background": "SQL",
            "messages": [{"role": "system", "content": "hi"}],
            "_rid": "abc",
            "_ts": 1700000000,
            "_etag": "\"00000000-0000\""
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.id.as_deref(), Some("doc-1"));
        assert_eq!(session.partition_key(), "s-1");
        assert_eq!(session.etag.as_deref(), Some("\"00000000-0000\""));
        assert_eq!(session.messages, vec![Message::system("hi")]);
    }

    #[test]
    fn test_end_keeps_first_end_time() {
        let mut session = Session::start(candidate(), job(), 0);
        session.end(100);
        session.end(200);

        assert_eq!(session.end_time, Some(100));
    }

    #[test]
    fn test_attach_feedback_overwrites() {
        let mut session = Session::start(candidate(), job(), 0);
        session.attach_feedback(Some("good".into()), Some(4.into()));
        session.attach_feedback(Some("better".into()), Some(5.into()));

        assert_eq!(session.feedback, Some(Value::from("better")));
        assert_eq!(session.rating, Some(Value::from(5)));
        assert_eq!(session.transcript_len(), 2);
    }
}
