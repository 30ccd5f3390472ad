//! HTTP API for the interview web client
//!
//! - POST|GET /api/interviewGPTTrigger - Run one interview step
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::ErrorResponse;
pub use routes::{create_router, INTERVIEW_PATH};
pub use state::AppState;
