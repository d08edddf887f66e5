use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::event_log::EventLog;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Opaque text generation capability.
///
/// Absence is a first-class outcome: any fault behind the implementation
/// (transport, quota, malformed response) must surface as `None`, never as
/// a panic or an error crossing this boundary, and never as an empty string.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_instruction: &str) -> Option<String>;
}

/// Gemini-backed generator. Faults are recorded in the event log under the
/// `GeminiError` category before being collapsed to `None`.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    event_log: EventLog,
}

impl GeminiGenerator {
    pub fn new(api_key: String, event_log: EventLog) -> Self {
        Self {
            client: Client::new(),
            api_key,
            event_log,
        }
    }

    async fn request_text(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, GEMINI_MODEL, self.api_key
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API returned HTTP {}: {}", status, body));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("Gemini response contained no candidate text"))?;

        debug!("Gemini returned {} chars", text.len());
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, system_instruction: &str, user_instruction: &str) -> Option<String> {
        let prompt = format!("{}\n{}", system_instruction, user_instruction);
        match self.request_text(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                self.event_log.record("GeminiError", &prompt, &e.to_string());
                None
            }
        }
    }
}
