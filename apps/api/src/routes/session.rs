use axum::{extract::State, Json};

use crate::state::{AppState, SessionSummary};

/// GET /api/v1/session
/// What the UI needs to pick a screen: whether a profile exists, result counts and the
/// current failure banner.
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSummary> {
    let application_count = state.ledger.lock().await.len();
    Json(state.session.read().await.summary(application_count))
}
