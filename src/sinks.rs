use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::info;

use crate::event_log::EventLog;
use crate::models::{CalendarEventResult, Priority, SendResult};

/// External calendar target, invoked once per action item.
#[async_trait]
pub trait CalendarSink: Send + Sync {
    async fn create_event(&self, title: &str, description: &str, date: &str)
        -> CalendarEventResult;
}

/// External notification target, invoked once per action item.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send_action(
        &self,
        task: &str,
        owner: &str,
        due_date: &str,
        priority: Priority,
    ) -> SendResult;
}

/// Simulated calendar. A real implementation would call a calendar or
/// ticketing API; this one echoes the event back and leaves a trace line.
pub struct SimulatedCalendar;

#[async_trait]
impl CalendarSink for SimulatedCalendar {
    async fn create_event(
        &self,
        title: &str,
        description: &str,
        date: &str,
    ) -> CalendarEventResult {
        info!(
            "Creating event: '{}' on {}. Description: {}",
            title, date, description
        );
        CalendarEventResult {
            status: "ok".to_string(),
            title: title.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        }
    }
}

/// Discord-webhook-backed notifier. A missing webhook URL is a non-fatal
/// configuration gap reported per item, not a startup error.
pub struct WebhookNotifier {
    client: Client,
    webhook_url: Option<String>,
    event_log: EventLog,
}

impl WebhookNotifier {
    pub fn new(webhook_url: Option<String>, event_log: EventLog) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
            event_log,
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn send_action(
        &self,
        task: &str,
        owner: &str,
        due_date: &str,
        priority: Priority,
    ) -> SendResult {
        let Some(url) = self.webhook_url.as_deref() else {
            self.event_log.record(
                "DiscordError",
                &format!("Webhook not set for task: {}", task),
                "DISCORD_WEBHOOK_URL not set",
            );
            return SendResult::failed("DISCORD_WEBHOOK_URL not set");
        };

        let message = format!(
            "**Action Item:**\n**Task:** {}\n**Owner:** {}\n**Due Date:** {}\n**Priority:** {}",
            task, owner, due_date, priority
        );

        match self
            .client
            .post(url)
            .json(&json!({"content": message}))
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                self.event_log.record(
                    "DiscordResponse",
                    &format!("Task: {}", task),
                    &format!("Status: {}, Text: {}", status, body),
                );
                if status == StatusCode::NO_CONTENT {
                    SendResult::delivered()
                } else {
                    let error = format!("HTTP {}: {}", status, body);
                    self.event_log
                        .record("DiscordError", &format!("Task: {}", task), &error);
                    SendResult::failed(error)
                }
            }
            Err(e) => {
                self.event_log
                    .record("DiscordException", &format!("Task: {}", task), &e.to_string());
                SendResult::failed(e.to_string())
            }
        }
    }
}
