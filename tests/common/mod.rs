// Test doubles for the orchestrator's collaborators
//
// Each double counts its calls so tests can assert exactly which external
// services a request touched.

#![allow(dead_code)]

use anyhow::Result;
use interview_gpt::{
    ChatCompleter, InterviewRequest, InterviewResponse, MemoryStore, Message, Orchestrator,
    OrchestratorSettings, Session, SessionStore, Transcriber,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// MemoryStore that counts calls per operation
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub creates: AtomicUsize,
    pub reads: AtomicUsize,
    pub replaces: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.reads.load(Ordering::SeqCst)
            + self.replaces.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.replaces.load(Ordering::SeqCst)
    }

    /// Load a session without counting it
    pub async fn stored(&self, response: &InterviewResponse) -> Session {
        let container = response.session_container.as_deref().unwrap_or("sessions");
        self.inner
            .read(
                container,
                response.id.as_deref().unwrap(),
                response.session_id.as_deref().unwrap(),
            )
            .await
            .unwrap()
    }
}

#[async_trait::async_trait]
impl SessionStore for CountingStore {
    async fn create(&self, container: &str, session: Session) -> Result<Session> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(container, session).await
    }

    async fn read(&self, container: &str, id: &str, partition_key: &str) -> Result<Session> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(container, id, partition_key).await
    }

    async fn replace(&self, container: &str, session: Session) -> Result<Session> {
        self.replaces.fetch_add(1, Ordering::SeqCst);
        self.inner.replace(container, session).await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Chat double answering "Question N" and recording each transcript it saw
#[derive(Default)]
pub struct ScriptedChat {
    pub seen: Mutex<Vec<Vec<Message>>>,
    pub fail: bool,
}

impl ScriptedChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChatCompleter for ScriptedChat {
    async fn complete(&self, _model: &str, messages: &[Message]) -> Result<Message> {
        let mut seen = self.seen.lock().unwrap();
        seen.push(messages.to_vec());
        if self.fail {
            anyhow::bail!("chat service unavailable");
        }
        Ok(Message::assistant(format!("Question {}", seen.len())))
    }
}

/// Transcriber double returning fixed text
pub struct FixedTranscriber {
    pub text: String,
    pub calls: AtomicUsize,
    /// (path, file contents at call time)
    pub files: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl FixedTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
            files: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, audio: &Path, _model: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bytes = std::fs::read(audio)?;
        self.files
            .lock()
            .unwrap()
            .push((audio.to_path_buf(), bytes));
        Ok(self.text.clone())
    }
}

pub struct Harness {
    pub store: Arc<CountingStore>,
    pub chat: Arc<ScriptedChat>,
    pub transcriber: Arc<FixedTranscriber>,
    pub orchestrator: Orchestrator,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(ScriptedChat::default(), FixedTranscriber::new("transcribed answer"))
    }

    pub fn with(chat: ScriptedChat, transcriber: FixedTranscriber) -> Self {
        let store = Arc::new(CountingStore::default());
        let chat = Arc::new(chat);
        let transcriber = Arc::new(transcriber);
        let orchestrator = Orchestrator::new(
            store.clone(),
            chat.clone(),
            transcriber.clone(),
            OrchestratorSettings::default(),
        );
        Self {
            store,
            chat,
            transcriber,
            orchestrator,
        }
    }

    /// Calls to any collaborator
    pub fn collaborator_calls(&self) -> usize {
        self.store.calls() + self.chat.calls() + self.transcriber.calls()
    }

    pub async fn start(&self) -> InterviewResponse {
        self.orchestrator.handle(start_request()).await.unwrap()
    }
}

pub fn start_request() -> InterviewRequest {
    serde_json::from_value(json!({
        "interview": {
            "state": "start_interview",
            "company": "Contoso",
            "job_title": "Backend Engineer",
            "job_description": "design and operate payment APIs",
            "candidate_background": "six years building Rust services"
        },
        "metadata": {
            "username": "ada@example.com",
            "given_name": "Ada",
            "localAccountId": "acct-42",
            "userAgent": "Mozilla/5.0"
        }
    }))
    .unwrap()
}

/// Request continuing the session named in `previous`
pub fn follow_up(
    state: &str,
    previous: &InterviewResponse,
    candidate_response: Option<&str>,
) -> InterviewRequest {
    let mut interview = json!({ "state": state });
    if let Some(response) = candidate_response {
        interview["candidate_response"] = json!(response);
    }

    serde_json::from_value(json!({
        "interview": interview,
        "metadata": {
            "username": "ada@example.com",
            "given_name": "Ada",
            "localAccountId": "acct-42",
            "userAgent": "Mozilla/5.0",
            "session_container": previous.session_container.as_deref().unwrap_or("sessions"),
            "id": previous.id,
            "session_id": previous.session_id
        }
    }))
    .unwrap()
}

pub fn feedback_request(
    previous: &InterviewResponse,
    feedback: &str,
    rating: u32,
) -> InterviewRequest {
    let mut request = follow_up("user_feedback", previous, None);
    request.feedback = Some(json!(feedback));
    request.rating = Some(json!(rating));
    request
}

pub fn wav_data_uri(bytes: &[u8]) -> String {
    use base64::Engine;
    format!(
        "data:audio/wav;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
