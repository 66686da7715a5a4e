use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
///
/// `GEMINI_API_KEY` is optional at startup: without it the server still serves
/// the form, and every analysis fails with an internal error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Request body cap for uploads. `None` disables the limit entirely.
    pub max_upload_bytes: Option<usize>,
    /// Transcript length cap (in chars) before prompting. `None` forwards everything.
    pub max_transcript_chars: Option<usize>,
    pub llm_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_optional("MAX_UPLOAD_BYTES")?,
            max_transcript_chars: parse_optional("MAX_TRANSCRIPT_CHARS")?,
            llm_timeout_secs: parse_optional("LLM_TIMEOUT_SECS")?,
        })
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_optional<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' must be a positive number, got '{raw}'"))
        })
        .transpose()
}
