//! Interview request handling
//!
//! One request drives one step of the interview state machine:
//! - `start_interview` - create the session and get the first question
//! - `candidate_response` - record an answer (text or audio) and get the next question
//! - `end_interview` - close the session and ask for feedback
//! - `user_feedback` - store the candidate's rating of the practice session

mod orchestrator;
mod request;
mod response;

pub use orchestrator::{Orchestrator, OrchestratorSettings};
pub use request::{InterviewDetails, InterviewRequest, Metadata, Phase};
pub use response::{InterviewResponse, ResponseState};
