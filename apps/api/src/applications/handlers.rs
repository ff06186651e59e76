//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::applications::ledger::{
    apply_to_job, bulk_apply, ApplyOutcome, BulkApplyReport, LedgerSummary,
};
use crate::errors::AppError;
use crate::generation::follow_up::generate_follow_up_email;
use crate::generation::handlers::FollowUpResponse;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApplyRequest {
    pub job_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
    pub summary: LedgerSummary,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Json<ApplicationListResponse> {
    let ledger = state.ledger.lock().await;
    Json(ApplicationListResponse {
        applications: ledger.applications().to_vec(),
        summary: ledger.summary(),
    })
}

/// POST /api/v1/applications
///
/// Applies to one job from the current results. Re-applying returns the existing
/// application with `created: false`.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplyOutcome>, AppError> {
    let _in_flight = state.apply_gate.try_begin()?;

    let (profile, job) = {
        let session = state.session.read().await;
        let profile = session.require_profile()?;
        let job = session
            .find_job(&request.job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job {} is not in the results", request.job_id)))?;
        (profile, job)
    };

    let outcome = apply_to_job(
        &state.ledger,
        state.llm.as_ref(),
        &state.config.models.generation,
        &profile,
        job,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/applications/bulk
pub async fn handle_bulk_apply(
    State(state): State<AppState>,
    Json(request): Json<BulkApplyRequest>,
) -> Result<Json<BulkApplyReport>, AppError> {
    let _in_flight = state.bulk_apply_gate.try_begin()?;

    if request.job_ids.is_empty() {
        return Err(AppError::Validation("Select at least one job".to_string()));
    }

    let (profile, jobs) = {
        let session = state.session.read().await;
        let profile = session.require_profile()?;
        let jobs = request
            .job_ids
            .iter()
            .map(|id| {
                session
                    .find_job(id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Job {id} is not in the results")))
            })
            .collect::<Result<Vec<JobPosting>, AppError>>()?;
        (profile, jobs)
    };

    let report = bulk_apply(
        &state.ledger,
        state.llm.as_ref(),
        &state.config.models.generation,
        &profile,
        jobs,
    )
    .await;

    Ok(Json(report))
}

/// PATCH /api/v1/applications/:job_id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Application>, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger
        .set_status(&job_id, request.status)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No application for job {job_id}")))
}

/// POST /api/v1/applications/:job_id/follow-up
pub async fn handle_application_follow_up(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<FollowUpResponse>, AppError> {
    let job = state
        .ledger
        .lock()
        .await
        .get(&job_id)
        .map(|a| a.job.clone())
        .ok_or_else(|| AppError::NotFound(format!("No application for job {job_id}")))?;

    let email =
        generate_follow_up_email(state.llm.as_ref(), &state.config.models.generation, &job)
            .await?;

    Ok(Json(FollowUpResponse { email }))
}
