use std::time::Duration;

use anyhow::{Context, Result};

use crate::contract::prompts::DEFAULT_LENDER;
use crate::llm_client::{LlmSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Clone)]
pub struct Config {
    /// Fallback credential for requests that do not carry their own key.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub lender_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("lender_name", &self.lender_name)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            openai_api_key: non_blank("OPENAI_API_KEY"),
            openai_base_url: non_blank("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_model: non_blank("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: non_blank("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            lender_name: non_blank("LENDER_NAME").unwrap_or_else(|| DEFAULT_LENDER.to_string()),
            port: non_blank("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_blank("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Client settings for the given credential.
    pub fn llm_settings(&self, api_key: &str) -> LlmSettings {
        LlmSettings {
            api_key: api_key.to_string(),
            base_url: self.openai_base_url.clone(),
            model: self.llm_model.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}
