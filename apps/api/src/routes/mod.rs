pub mod health;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::discovery::handlers as discovery;
use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(session::handle_get_session))
        // Profile API
        .route(
            "/api/v1/profile",
            post(profile::handle_upload_profile)
                .get(profile::handle_get_profile)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Jobs API
        .route("/api/v1/jobs", get(discovery::handle_get_jobs))
        .route("/api/v1/jobs/search", post(discovery::handle_search_jobs))
        // Generation API
        .route(
            "/api/v1/generate/cover-letter",
            post(generation::handle_cover_letter),
        )
        .route(
            "/api/v1/generate/follow-up",
            post(generation::handle_follow_up),
        )
        // Applications API
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications).post(applications::handle_apply),
        )
        .route(
            "/api/v1/applications/bulk",
            post(applications::handle_bulk_apply),
        )
        .route(
            "/api/v1/applications/:job_id/status",
            patch(applications::handle_update_status),
        )
        .route(
            "/api/v1/applications/:job_id/follow-up",
            post(applications::handle_application_follow_up),
        )
        .with_state(state)
}
