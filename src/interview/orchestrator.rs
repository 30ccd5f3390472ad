use super::request::{InterviewRequest, Phase};
use super::response::InterviewResponse;
use crate::audio::{self, AudioClip, AudioFile, CandidateInput};
use crate::openai::{ChatCompleter, Transcriber};
use crate::session::{end_interview_prompt, Message, Session, NO_ANSWERS_RESPONSE};
use crate::store::SessionStore;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Models and defaults the orchestrator runs with
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub chat_model: String,
    pub transcription_model: String,
    /// Container new sessions are created in
    pub default_container: String,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            chat_model: "gpt-3.5-turbo".to_string(),
            transcription_model: "whisper-1".to_string(),
            default_container: "sessions".to_string(),
        }
    }
}

/// How a loaded session's transcript grows this turn
#[derive(Debug, Clone, Copy)]
enum Turn {
    Answer,
    End,
}

/// Drives one interview step per request against the injected collaborators
pub struct Orchestrator {
    store: Arc<dyn SessionStore>,
    chat: Arc<dyn ChatCompleter>,
    transcriber: Arc<dyn Transcriber>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        chat: Arc<dyn ChatCompleter>,
        transcriber: Arc<dyn Transcriber>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            store,
            chat,
            transcriber,
            settings,
        }
    }

    /// Handle one interview request.
    ///
    /// Validation problems come back as soft responses; errors are
    /// collaborator failures.
    pub async fn handle(&self, request: InterviewRequest) -> Result<InterviewResponse> {
        match request.interview.state {
            Phase::StartInterview => self.start_interview(&request).await,
            Phase::UserFeedback => self.user_feedback(request).await,
            Phase::CandidateResponse => self.continue_interview(&request, Turn::Answer).await,
            Phase::EndInterview => self.continue_interview(&request, Turn::End).await,
            Phase::Unrecognized => {
                warn!("Ignoring request with unrecognized interview state");
                Ok(InterviewResponse::invalid())
            }
        }
    }

    async fn start_interview(&self, request: &InterviewRequest) -> Result<InterviewResponse> {
        let container = self.settings.default_container.as_str();
        let session = Session::start(
            request.candidate(),
            request.job_context(),
            Utc::now().timestamp_millis(),
        );

        info!(
            "Starting interview {} for {} ({} at {})",
            session.session_id, session.username, session.job_title, session.company
        );

        let session = self
            .store
            .create(container, session)
            .await
            .context("Failed to create session")?;

        self.reply(container, session).await
    }

    async fn user_feedback(&self, request: InterviewRequest) -> Result<InterviewResponse> {
        let container = self.container_for(&request);
        let mut session = self.load(&request, &container).await?;

        info!("Saving feedback for session {}", session.session_id);

        session.attach_feedback(request.feedback, request.rating);
        self.persist(&container, session).await?;

        Ok(InterviewResponse::success())
    }

    async fn continue_interview(
        &self,
        request: &InterviewRequest,
        turn: Turn,
    ) -> Result<InterviewResponse> {
        // Reject unusable audio before touching any collaborator
        let input = match request
            .interview
            .candidate_response
            .as_deref()
            .map(audio::parse_candidate_response)
            .transpose()
        {
            Ok(input) => input,
            Err(e) => {
                warn!("Rejecting candidate response: {}", e);
                return Ok(InterviewResponse::invalid_audio_file_type(e.type_tag()));
            }
        };

        let container = self.container_for(request);
        let mut session = self.load(request, &container).await?;

        let answer = match input {
            Some(CandidateInput::Text(text)) => Some(text),
            Some(CandidateInput::Audio(clip)) => Some(self.transcribe(&clip).await?),
            None => None,
        };

        match turn {
            Turn::Answer => {
                info!("Candidate answered in session {}", session.session_id);
                session.push(Message::user(answer.unwrap_or_default()));
            }
            Turn::End => {
                session.end(Utc::now().timestamp_millis());

                // Only the briefing, kickoff and first question so far
                if session.transcript_len() <= 3 && answer.is_none() {
                    info!(
                        "Interview {} ended before any answer, skipping feedback",
                        session.session_id
                    );
                    return Ok(InterviewResponse::closing(&session, NO_ANSWERS_RESPONSE));
                }

                info!("Ending interview {}", session.session_id);
                session.push(Message::user(end_interview_prompt(answer.as_deref())));
            }
        }

        let session = self.persist(&container, session).await?;
        self.reply(&container, session).await
    }

    /// Ask the interviewer model for its next turn and store it
    async fn reply(&self, container: &str, mut session: Session) -> Result<InterviewResponse> {
        let message = self
            .chat
            .complete(&self.settings.chat_model, &session.messages)
            .await
            .context("Chat completion failed")?;

        let ai_response = message.content.clone();
        session.push(message);
        let session = self.persist(container, session).await?;

        Ok(InterviewResponse::reply(&session, container, ai_response))
    }

    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        let file = AudioFile::write(clip)?;
        let text = self
            .transcriber
            .transcribe(file.path(), &self.settings.transcription_model)
            .await
            .context("Transcription failed")?;

        Ok(audio::correct_transcription(&text))
    }

    fn container_for(&self, request: &InterviewRequest) -> String {
        request
            .metadata
            .session_container
            .clone()
            .unwrap_or_else(|| self.settings.default_container.clone())
    }

    async fn load(&self, request: &InterviewRequest, container: &str) -> Result<Session> {
        let id = request
            .metadata
            .id
            .as_deref()
            .context("metadata.id is required for an existing session")?;
        let session_id = request
            .metadata
            .session_id
            .as_deref()
            .context("metadata.session_id is required for an existing session")?;

        self.store
            .read(container, id, session_id)
            .await
            .with_context(|| format!("Failed to load session {}", session_id))
    }

    async fn persist(&self, container: &str, session: Session) -> Result<Session> {
        let session_id = session.session_id.clone();
        self.store
            .replace(container, session)
            .await
            .with_context(|| format!("Failed to save session {}", session_id))
    }
}
