use super::state::AppState;
use crate::interview::InterviewRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/interviewGPTTrigger
/// Run one step of an interview
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(req): Json<InterviewRequest>,
) -> impl IntoResponse {
    let phase = req.interview.state;
    info!("Interview request: {:?}", phase);

    match state.orchestrator.handle(req).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            // Detail stays in the log; callers get no session context
            error!("Interview request {:?} failed: {:#}", phase, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
