use serde_json::{json, Value};

/// Schema embedded in the discovery prompt and used to validate each returned posting.
pub fn jobs_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING", "description": "A unique ID for the job posting." },
                "title": { "type": "STRING" },
                "company": { "type": "STRING" },
                "location": { "type": "STRING" },
                "description": { "type": "STRING", "description": "A detailed job description of 3-5 sentences." },
                "url": { "type": "STRING", "description": "The direct URL to the job posting." },
                "relevanceScore": { "type": "NUMBER", "description": "A score from 0 to 100 indicating how relevant this job is to the resume." },
                "visaSponsorship": { "type": "BOOLEAN", "description": "Whether the company is known to sponsor visas for this role. Set to true if visa sponsorship is mentioned or likely, otherwise false." },
                "experienceLevel": { "type": "STRING", "description": "The experience level required for the job (e.g., Entry-level, Mid-level, Senior)." }
            },
            "required": [
                "id", "title", "company", "location", "description",
                "url", "relevanceScore", "visaSponsorship", "experienceLevel"
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::schema::schema_violations;
    use crate::models::job::fixtures::job;

    #[test]
    fn test_serialized_postings_conform() {
        let value = serde_json::to_value(vec![job("a", 10.0), job("b", 99.5)]).unwrap();
        assert!(schema_violations(&jobs_schema(), &value).is_empty());
    }
}
