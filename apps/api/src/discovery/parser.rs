//! Defensive parsing of the discovery model's free-text answer.
//!
//! Tier 1: strip code-fence markers, trim, decode the whole text as a JSON array.
//! Tier 2: decode the first `[` … last `]` span found in the text.
//! Either tier's result is then validated as a whole batch; one bad posting fails
//! the entire call, nothing partial is returned.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::discovery::schema::jobs_schema;
use crate::errors::AppError;
use crate::llm_client::schema::schema_violations;
use crate::models::job::JobPosting;

fn array_span() -> &'static Regex {
    static ARRAY_SPAN: OnceLock<Regex> = OnceLock::new();
    ARRAY_SPAN.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid"))
}

/// Parses, validates and ranks job postings from raw model text.
pub fn parse_job_listings(text: &str) -> Result<Vec<JobPosting>, AppError> {
    let value = extract_json_array(text)?;
    let mut jobs = validate_postings(value)?;
    rank_by_relevance(&mut jobs);
    Ok(jobs)
}

/// Removes every markdown fence marker, wherever it appears.
pub fn remove_fence_markers(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn extract_json_array(text: &str) -> Result<Value, AppError> {
    let cleaned = remove_fence_markers(text);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ Value::Array(_)) => return Ok(value),
        Ok(_) => warn!("Job listings response is JSON but not an array; trying fallback"),
        Err(e) => warn!("Failed to parse job listings JSON: {e}; trying fallback"),
    }

    let span = array_span().find(&cleaned).ok_or_else(|| {
        AppError::Discovery("invalid format: no JSON array found in model response".to_string())
    })?;

    serde_json::from_str::<Value>(span.as_str())
        .ok()
        .filter(Value::is_array)
        .ok_or_else(|| {
            AppError::Discovery(
                "invalid format: the JSON array in the model response could not be decoded"
                    .to_string(),
            )
        })
}

fn validate_postings(value: Value) -> Result<Vec<JobPosting>, AppError> {
    let violations = schema_violations(&jobs_schema(), &value);
    if !violations.is_empty() {
        return Err(AppError::Discovery(format!(
            "malformed job posting ({})",
            violations.join("; ")
        )));
    }

    let jobs: Vec<JobPosting> = serde_json::from_value(value)
        .map_err(|e| AppError::Discovery(format!("malformed job posting: {e}")))?;

    let mut seen = HashSet::new();
    for job in &jobs {
        if !(0.0..=100.0).contains(&job.relevance_score) {
            return Err(AppError::Discovery(format!(
                "job '{}' has relevance score {} outside 0-100",
                job.id, job.relevance_score
            )));
        }
        if !seen.insert(job.id.as_str()) {
            return Err(AppError::Discovery(format!(
                "duplicate job id '{}' in results",
                job.id
            )));
        }
    }

    Ok(jobs)
}

/// Highest relevance first. Stable: equal scores keep their original order.
pub fn rank_by_relevance(jobs: &mut [JobPosting]) {
    jobs.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
}
