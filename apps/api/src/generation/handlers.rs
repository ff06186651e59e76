//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::cover_letter::generate_cover_letter_snippet;
use crate::generation::follow_up::generate_follow_up_email;
use crate::models::job::JobPosting;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub job: JobPosting,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub snippet: String,
}

#[derive(Debug, Serialize)]
pub struct FollowUpResponse {
    pub email: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/cover-letter
///
/// Cover-letter opening for the session profile and the given posting.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let profile = state.session.read().await.require_profile()?;

    let snippet = generate_cover_letter_snippet(
        state.llm.as_ref(),
        &state.config.models.generation,
        &profile,
        &request.job,
    )
    .await?;

    Ok(Json(CoverLetterResponse { snippet }))
}

/// POST /api/v1/generate/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<FollowUpResponse>, AppError> {
    let email = generate_follow_up_email(
        state.llm.as_ref(),
        &state.config.models.generation,
        &request.job,
    )
    .await?;

    Ok(Json(FollowUpResponse { email }))
}
