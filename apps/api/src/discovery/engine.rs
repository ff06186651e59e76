//! Job Discovery Engine: builds the search prompt, runs a web-grounded model call,
//! and turns the answer into ranked postings plus citations.

use serde::Serialize;
use tracing::{info, warn};

use crate::discovery::parser::parse_job_listings;
use crate::discovery::prompts::build_discovery_prompt;
use crate::errors::AppError;
use crate::llm_client::{GenerativeModel, LlmError, ModelRequest};
use crate::models::job::{JobPosting, RelevanceTier, SearchFilters, SourceCitation};
use crate::models::profile::Profile;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryResult {
    pub jobs: Vec<JobPosting>,
    pub sources: Vec<SourceCitation>,
}

/// Runs one discovery search. No caching, no retry.
pub async fn discover_jobs(
    llm: &dyn GenerativeModel,
    model: &str,
    profile: &Profile,
    filters: &SearchFilters,
    role_categories: &[String],
) -> Result<DiscoveryResult, AppError> {
    let prompt = build_discovery_prompt(profile, filters, role_categories)?;
    let request = ModelRequest::new(model).text(prompt).with_web_search();

    let response = llm.generate(&request).await.map_err(|e| match e {
        LlmError::EmptyContent => {
            AppError::Discovery("invalid format: empty model response".to_string())
        }
        other => AppError::Transport(other),
    })?;
    let jobs = parse_job_listings(&response.text)?;

    for job in &jobs {
        if !is_web_url(&job.url) {
            warn!("Job '{}' has a malformed URL: {}", job.id, job.url);
        }
    }

    let high_relevance = jobs
        .iter()
        .filter(|j| j.relevance_tier() == RelevanceTier::High)
        .count();
    info!(
        "Discovery returned {} jobs ({} high relevance) with {} sources",
        jobs.len(),
        high_relevance,
        response.citations.len()
    );

    Ok(DiscoveryResult {
        jobs,
        sources: response.citations,
    })
}

fn is_web_url(raw: &str) -> bool {
    reqwest::Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::wire::GenerateContentResponse;
    use crate::llm_client::ModelResponse;
    use crate::models::profile::fixtures::sample_profile;
    use serde_json::json;

    fn answer() -> String {
        json!([
            {"id": "a", "title": "Analyst", "company": "A", "location": "Remote",
             "description": "d", "url": "not a url", "relevanceScore": 60,
             "visaSponsorship": false, "experienceLevel": "Junior"},
            {"id": "b", "title": "Scientist", "company": "B", "location": "Remote",
             "description": "d", "url": "https://b.example/jobs/1", "relevanceScore": 90,
             "visaSponsorship": true, "experienceLevel": "Senior"}
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_discovery_ranks_jobs_and_passes_sources_through() {
        let text = answer();
        let model = ScriptedModel::new(move |_| {
            Ok(ModelResponse {
                text: text.clone(),
                citations: vec![SourceCitation {
                    uri: "https://b.example".to_string(),
                    title: "B careers".to_string(),
                }],
            })
        });

        let filters = SearchFilters {
            visa_sponsorship: true,
            ..Default::default()
        };
        let result = discover_jobs(
            &model,
            "gemini-2.5-pro",
            &sample_profile(),
            &filters,
            &["Data Scientist".to_string()],
        )
        .await
        .unwrap();

        let ids: Vec<_> = result.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        // malformed URLs are kept
        assert_eq!(result.jobs[1].url, "not a url");
        assert_eq!(result.sources.len(), 1);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].web_search);
        assert!(requests[0].response_schema.is_none());
        assert!(requests[0].prompt_text().contains("visa sponsorship"));
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_discovery_error() {
        let model = ScriptedModel::replying("No jobs today.");
        let result = discover_jobs(
            &model,
            "m",
            &sample_profile(),
            &SearchFilters::default(),
            &[],
        )
        .await;
        assert!(matches!(result, Err(AppError::Discovery(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_a_discovery_error() {
        let model = ScriptedModel::new(|_| {
            Err(LlmError::Api {
                status: 500,
                message: "backend error".to_string(),
            })
        });
        let result = discover_jobs(
            &model,
            "m",
            &sample_profile(),
            &SearchFilters::default(),
            &[],
        )
        .await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_blank_answer_is_discovery_error() {
        let raw = json!({"candidates": [{"content": {"parts": [{"text": "   "}]}, "finishReason": "STOP"}]});
        let model = ScriptedModel::new(move |_| {
            serde_json::from_value::<GenerateContentResponse>(raw.clone())
                .unwrap()
                .into_model_response()
        });
        let result = discover_jobs(
            &model,
            "m",
            &sample_profile(),
            &SearchFilters::default(),
            &[],
        )
        .await;
        match result {
            Err(AppError::Discovery(msg)) => assert!(msg.contains("empty model response")),
            other => panic!("expected Discovery error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("https://jobs.example.com/1"));
        assert!(is_web_url("http://example.com"));
        assert!(!is_web_url("ftp://example.com/file"));
        assert!(!is_web_url("/jobs/1"));
        assert!(!is_web_url(""));
    }
}
