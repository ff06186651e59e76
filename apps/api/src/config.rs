use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_ROLE_CATEGORIES: &str = "Data Scientist,Business Intelligence Engineer,Data Analyst";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Model names used per operation. Extraction and generation use the fast model,
/// discovery uses the stronger one since it has to drive web search.
#[derive(Debug, Clone)]
pub struct ModelNames {
    pub extraction: String,
    pub discovery: String,
    pub generation: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if `API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub models: ModelNames,
    pub role_categories: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            api_key: require(&lookup, "API_KEY")?,
            api_base: var("GEMINI_API_BASE", DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            models: ModelNames {
                extraction: var("EXTRACTION_MODEL", "gemini-2.5-flash"),
                discovery: var("DISCOVERY_MODEL", "gemini-2.5-pro"),
                generation: var("GENERATION_MODEL", "gemini-2.5-flash"),
            },
            role_categories: parse_list(&var("ROLE_CATEGORIES", DEFAULT_ROLE_CATEGORIES)),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "9000")])).unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        assert!(Config::from_lookup(lookup_from(&[("API_KEY", "   ")])).is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.models.extraction, "gemini-2.5-flash");
        assert_eq!(config.models.discovery, "gemini-2.5-pro");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(
            config.role_categories,
            vec![
                "Data Scientist",
                "Business Intelligence Engineer",
                "Data Analyst"
            ]
        );
    }

    #[test]
    fn test_overrides_and_list_parsing() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "k"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("ROLE_CATEGORIES", " Rust Engineer, ,SRE "),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.role_categories, vec!["Rust Engineer", "SRE"]);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup_from(&[("API_KEY", "k"), ("PORT", "http")]));
        assert!(result.is_err());
    }
}
