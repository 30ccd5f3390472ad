//! Interview session model
//!
//! This module provides the persisted `Session` document and its transcript:
//! - Identity and job context captured when the interview starts
//! - The role-tagged `Message` transcript, append-only
//! - The fixed persona, kickoff and closing prompts

mod prompts;
mod session;

pub use prompts::{end_interview_prompt, kickoff_prompt, system_prompt, NO_ANSWERS_RESPONSE};
pub use session::{Candidate, JobContext, Message, Role, Session};
