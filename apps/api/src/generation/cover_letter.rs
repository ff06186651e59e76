//! Cover-letter snippet generator: a two-sentence opening tailored to one posting.

use crate::errors::AppError;
use crate::generation::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::llm_client::{GenerativeModel, ModelRequest};
use crate::models::job::JobPosting;
use crate::models::profile::Profile;

pub async fn generate_cover_letter_snippet(
    llm: &dyn GenerativeModel,
    model: &str,
    profile: &Profile,
    job: &JobPosting,
) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{resume_json}", &resume_json)
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{description}", &job.description);

    let response = llm
        .generate(&ModelRequest::new(model).text(prompt))
        .await
        .map_err(|e| AppError::Generation(format!("cover letter for '{}': {e}", job.title)))?;

    Ok(response.text.trim().to_string())
}
