//! Discovery prompt construction: fixed request, filter clauses, schema and profile.

use crate::discovery::schema::jobs_schema;
use crate::errors::AppError;
use crate::llm_client::prompts::{json_block, JSON_ONLY_INSTRUCTION};
use crate::models::job::{ExperienceLevel, SearchFilters};
use crate::models::profile::Profile;

/// Number of postings requested per search.
pub const TARGET_POSTING_COUNT: usize = 8;

pub fn build_discovery_prompt(
    profile: &Profile,
    filters: &SearchFilters,
    role_categories: &[String],
) -> Result<String, AppError> {
    let mut prompt = format!(
        "Based on this resume JSON, act as an expert recruiter. Use Google Search to find \
         {TARGET_POSTING_COUNT} currently open, real job postings suitable for this candidate. \
         {} on job boards like LinkedIn, Greenhouse, or Indeed. \
         Provide a diverse list from major tech companies.",
        role_sentence(role_categories)
    );

    for clause in filter_clauses(filters) {
        prompt.push('\n');
        prompt.push_str(&clause);
    }

    let schema = json_block("Schema", &jobs_schema())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize jobs schema: {e}")))?;
    let resume = json_block("Resume", profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    prompt.push_str(&format!("\n\n{JSON_ONLY_INSTRUCTION}\n\n{schema}\n\n{resume}"));
    Ok(prompt)
}

/// One instruction line per active filter, in a fixed order.
pub fn filter_clauses(filters: &SearchFilters) -> Vec<String> {
    let mut clauses = Vec::new();

    if filters.experience_level != ExperienceLevel::Any {
        clauses.push(format!(
            "The job must be at the {} level.",
            filters.experience_level
        ));
    }
    let country = filters.country.trim();
    if !country.is_empty() {
        clauses.push(format!("The jobs must be located in {country}."));
    }
    if filters.is_remote {
        clauses.push("The job must be fully remote (work from anywhere).".to_string());
    }
    if filters.visa_sponsorship {
        clauses.push(
            "CRITICAL: The company must offer visa sponsorship for international candidates. \
             Use Google Search to verify this from the job posting, the company's career page, \
             or other reliable online sources. Only include jobs where visa sponsorship is \
             explicitly mentioned or highly probable."
                .to_string(),
        );
    }

    clauses
}

fn role_sentence(role_categories: &[String]) -> String {
    match role_categories {
        [] => "Search for roles that match the candidate's experience".to_string(),
        [only] => format!("Search for roles like {only}"),
        [first, second] => format!("Search for roles like {first} and {second}"),
        [init @ .., last] => format!("Search for roles like {}, and {last}", init.join(", ")),
    }
}
