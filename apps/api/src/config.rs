use anyhow::{bail, Context, Result};

/// Which generation provider backs the ranking pipeline.
/// Both produce the same raw-reply contract; see `llm_client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the selected provider's credential is missing —
/// there is no degraded mode without a generation provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub provider: ProviderKind,
    pub provider_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = match std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .as_str()
        {
            "gemini" => ProviderKind::Gemini,
            "openai" => ProviderKind::OpenAi,
            other => bail!("Unknown LLM_PROVIDER '{other}' (expected 'gemini' or 'openai')"),
        };

        let provider_api_key = match provider {
            ProviderKind::Gemini => require_env("GEMINI_API_KEY")?,
            ProviderKind::OpenAi => require_env("OPENAI_API_KEY")?,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            provider,
            provider_api_key,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
