use serde_json::{json, Value};

/// Response schema for profile extraction. Every field is required.
pub fn profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "contactInfo": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "email": { "type": "STRING" },
                    "phone": { "type": "STRING" },
                    "location": { "type": "STRING" }
                },
                "required": ["name", "email", "phone", "location"]
            },
            "summary": {
                "type": "STRING",
                "description": "A professional summary of 2-4 sentences. If not present in the resume, generate one based on the experience."
            },
            "experience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "role": { "type": "STRING" },
                        "company": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "dates": { "type": "STRING" },
                        "description": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["role", "company", "location", "dates", "description"]
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "degree": { "type": "STRING" },
                        "institution": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "dates": { "type": "STRING" }
                    },
                    "required": ["degree", "institution", "location", "dates"]
                }
            },
            "skills": {
                "type": "OBJECT",
                "properties": {
                    "programming": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "technical": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "languages": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["programming", "technical", "languages"]
            }
        },
        "required": ["contactInfo", "summary", "experience", "education", "skills"]
    })
}
