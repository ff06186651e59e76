use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Wishlist,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Wishlist,
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];
}

/// A tracked (simulated) application. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub job: JobPosting,
    pub status: ApplicationStatus,
    pub applied_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_snippet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::job;

    #[test]
    fn test_application_serializes_without_missing_snippet() {
        let app = Application {
            job: job("a", 50.0),
            status: ApplicationStatus::Interviewing,
            applied_date: "2026-10-16".to_string(),
            cover_letter_snippet: None,
        };
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["status"], "Interviewing");
        assert_eq!(value["appliedDate"], "2026-10-16");
        assert!(value.get("coverLetterSnippet").is_none());
    }
}
