//! Follow-up email generator.

use crate::errors::AppError;
use crate::generation::prompts::FOLLOW_UP_PROMPT_TEMPLATE;
use crate::llm_client::{GenerativeModel, ModelRequest};
use crate::models::job::JobPosting;

/// Returns the full email body, greeting through closing.
pub async fn generate_follow_up_email(
    llm: &dyn GenerativeModel,
    model: &str,
    job: &JobPosting,
) -> Result<String, AppError> {
    let prompt = FOLLOW_UP_PROMPT_TEMPLATE
        .replace("{title}", &job.title)
        .replace("{company}", &job.company);

    let response = llm
        .generate(&ModelRequest::new(model).text(prompt))
        .await
        .map_err(|e| AppError::Generation(format!("follow-up for '{}': {e}", job.title)))?;

    Ok(response.text.trim().to_string())
}
