use anyhow::{Context, Result};
use std::env;

/// Process-wide configuration, read once at startup and injected into the
/// components that need it. Nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub gemini_api_key: String,
    pub discord_webhook_url: Option<String>,
    pub event_log_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("MEETPIPE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("MEETPIPE_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("MEETPIPE_PORT must be a valid port number")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL is not set")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context(
                "GEMINI_API_KEY is not set. Configure it in .env or environment variables.",
            )?,
            discord_webhook_url: env::var("DISCORD_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            event_log_path: env::var("EVENT_LOG_PATH")
                .unwrap_or_else(|_| "logs/agent_logs.txt".to_string()),
        })
    }
}
