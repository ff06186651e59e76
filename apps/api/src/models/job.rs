use std::fmt;

use serde::{Deserialize, Serialize};

/// A job posting returned by discovery. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// Externally assigned, unique within one discovery result.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    /// 0 – 100
    pub relevance_score: f64,
    pub visa_sponsorship: bool,
    pub experience_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceTier {
    High,
    Medium,
    Low,
}

impl JobPosting {
    /// Buckets the relevance score: above 85 is high, above 70 medium, the rest low.
    pub fn relevance_tier(&self) -> RelevanceTier {
        if self.relevance_score > 85.0 {
            RelevanceTier::High
        } else if self.relevance_score > 70.0 {
            RelevanceTier::Medium
        } else {
            RelevanceTier::Low
        }
    }
}

/// Experience level filter. `Any` leaves the search unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    Any,
    #[serde(rename = "Entry-level")]
    EntryLevel,
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Any => "Any",
            ExperienceLevel::EntryLevel => "Entry-level",
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Free text; empty means any country.
    pub country: String,
    pub is_remote: bool,
    pub visa_sponsorship: bool,
    pub experience_level: ExperienceLevel,
}

/// A web source the discovery model cited. Attached to the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub uri: String,
    pub title: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn job(id: &str, score: f64) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: format!("Data Scientist {id}"),
            company: format!("Company {id}"),
            location: "Remote".to_string(),
            description: "Build models. Ship insights. Work with product.".to_string(),
            url: format!("https://jobs.example.com/{id}"),
            relevance_score: score,
            visa_sponsorship: false,
            experience_level: "Mid-level".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_tier_boundaries() {
        assert_eq!(fixtures::job("a", 86.0).relevance_tier(), RelevanceTier::High);
        assert_eq!(fixtures::job("a", 85.0).relevance_tier(), RelevanceTier::Medium);
        assert_eq!(fixtures::job("a", 71.0).relevance_tier(), RelevanceTier::Medium);
        assert_eq!(fixtures::job("a", 70.0).relevance_tier(), RelevanceTier::Low);
    }

    #[test]
    fn test_experience_level_labels_match_wire_format() {
        let level: ExperienceLevel = serde_json::from_str(r#""Entry-level""#).unwrap();
        assert_eq!(level, ExperienceLevel::EntryLevel);
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::MidLevel).unwrap(),
            r#""Mid-level""#
        );
        assert_eq!(ExperienceLevel::Senior.to_string(), "Senior");
    }

    #[test]
    fn test_search_filters_default_when_fields_missing() {
        let filters: SearchFilters = serde_json::from_str(r#"{"isRemote": true}"#).unwrap();
        assert!(filters.is_remote);
        assert!(filters.country.is_empty());
        assert!(!filters.visa_sponsorship);
        assert_eq!(filters.experience_level, ExperienceLevel::Any);
    }
}
