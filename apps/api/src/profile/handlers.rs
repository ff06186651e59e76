//! Axum route handlers for the Profile API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::profile::extractor::{extract_profile, UploadedDocument};
use crate::state::AppState;

/// POST /api/v1/profile
///
/// Multipart upload with a single `file` part (image or PDF). Extracts the profile,
/// stores it as the session profile, and drops results found for a previous one.
pub async fn handle_upload_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Profile>, AppError> {
    let _in_flight = state.upload_gate.try_begin()?;

    let document = read_document(&mut multipart).await?;
    state.session.write().await.banner = None;

    let profile = match extract_profile(
        state.llm.as_ref(),
        &state.config.models.extraction,
        &document,
    )
    .await
    {
        Ok(profile) => profile,
        Err(e) => {
            state.record_failure("Failed to parse resume", &e).await;
            return Err(e);
        }
    };

    info!("Profile extracted for {}", profile.contact_info.name);
    state.session.write().await.set_profile(profile.clone());

    Ok(Json(profile))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    state
        .session
        .read()
        .await
        .profile
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume has been uploaded yet".to_string()))
}

async fn read_document(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let media_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("The file part has no content type".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        return Ok(UploadedDocument::new(media_type, bytes));
    }

    Err(AppError::Validation(
        "Multipart body has no 'file' part".to_string(),
    ))
}
