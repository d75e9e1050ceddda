use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

const OPENAI_KEY_PLACEHOLDER: &str = "your-openai-api-key";
const YOUTUBE_KEY_PLACEHOLDER: &str = "your-youtube-api-key";

/// Application configuration loaded from environment variables.
/// Both external credentials are optional: a missing or placeholder value
/// switches the corresponding feature to its local fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub youtube_api_key: Option<String>,
    pub results_dir: PathBuf,
    pub remote_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            openai_api_key: credential(lookup("OPENAI_API_KEY"), OPENAI_KEY_PLACEHOLDER),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            youtube_api_key: credential(lookup("YOUTUBE_API_KEY"), YOUTUBE_KEY_PLACEHOLDER),
            results_dir: lookup("RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("saved_analyses")),
            remote_timeout: Duration::from_secs(
                lookup("REMOTE_SCORER_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("REMOTE_SCORER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Treats empty and placeholder values as "not configured".
fn credential(value: Option<String>, placeholder: &str) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert!(config.youtube_api_key.is_none());
        assert_eq!(config.openai_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.results_dir, PathBuf::from("saved_analyses"));
        assert_eq!(config.remote_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_placeholder_credentials_are_unset() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "your-openai-api-key"),
            ("YOUTUBE_API_KEY", "  "),
        ])
        .unwrap();
        assert!(config.openai_api_key.is_none());
        assert!(config.youtube_api_key.is_none());
    }

    #[test]
    fn test_real_credentials_kept() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("YOUTUBE_API_KEY", "yt-test"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.youtube_api_key.as_deref(), Some("yt-test"));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("REMOTE_SCORER_TIMEOUT_SECS", "-1")]).is_err());
    }
}
