//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use tracing::warn;

use crate::discovery::engine::{discover_jobs, DiscoveryResult};
use crate::errors::AppError;
use crate::models::job::SearchFilters;
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Runs discovery for the session profile. Previous results are cleared as soon as
/// the search starts; on failure the session keeps no jobs and records a banner.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<DiscoveryResult>, AppError> {
    let profile = {
        let mut session = state.session.write().await;
        let profile = session.require_profile()?;
        session.banner = None;
        session.jobs.clear();
        session.sources.clear();
        profile
    };

    let result = match discover_jobs(
        state.llm.as_ref(),
        &state.config.models.discovery,
        &profile,
        &filters,
        &state.config.role_categories,
    )
    .await
    {
        Ok(result) => result,
        Err(e) => {
            state.record_failure("Failed to find jobs", &e).await;
            return Err(e);
        }
    };

    let stored = state.session.write().await.store_results(
        &profile,
        result.jobs.clone(),
        result.sources.clone(),
    );
    if !stored {
        warn!("Resume changed during the search; discarding {} jobs", result.jobs.len());
        return Err(AppError::Conflict(
            "The resume changed while searching. Run the search again".to_string(),
        ));
    }

    Ok(Json(result))
}

/// GET /api/v1/jobs
///
/// Returns the most recent discovery result (empty before the first search).
pub async fn handle_get_jobs(State(state): State<AppState>) -> Json<DiscoveryResult> {
    let session = state.session.read().await;
    Json(DiscoveryResult {
        jobs: session.jobs.clone(),
        sources: session.sources.clone(),
    })
}
