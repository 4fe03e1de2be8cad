use anyhow::{bail, Context, Result};

use crate::llm_client::extract::ExtractionStrategy;

const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
///
/// The Gemini API key is deliberately absent: the dispatcher reads it from the
/// process environment on every call (see `api_key_var`).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key_var: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub extraction_strategy: ExtractionStrategy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key_var: env_or("GEMINI_API_KEY_VAR", DEFAULT_API_KEY_VAR),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            extraction_strategy: parse_strategy(&env_or(
                "EXTRACTION_STRATEGY",
                "first_last_brace",
            ))?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_strategy(raw: &str) -> Result<ExtractionStrategy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "first_last_brace" | "naive" => Ok(ExtractionStrategy::FirstLastBrace),
        "balanced" => Ok(ExtractionStrategy::Balanced),
        other => bail!(
            "EXTRACTION_STRATEGY must be 'first_last_brace' or 'balanced', got '{other}'"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy_accepts_known_names() {
        assert_eq!(
            parse_strategy("first_last_brace").unwrap(),
            ExtractionStrategy::FirstLastBrace
        );
        assert_eq!(
            parse_strategy(" Balanced ").unwrap(),
            ExtractionStrategy::Balanced
        );
    }

    #[test]
    fn test_parse_strategy_rejects_unknown_name() {
        let err = parse_strategy("regex").unwrap_err();
        assert!(err.to_string().contains("regex"));
    }

    #[test]
    fn test_env_or_falls_back_to_default() {
        assert_eq!(
            env_or("GRADPATH_TEST_NEVER_SET_VAR", "fallback"),
            "fallback"
        );
    }
}
