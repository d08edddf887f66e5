use std::time::Instant;

use crate::event_log::EventLog;
use crate::models::{ExecutionResults, Metrics};
use crate::pipeline::extract::Extraction;
use crate::sinks::{CalendarSink, NotificationSink};

/// Fans each action item out to the calendar and notification sinks,
/// in list order, calendar first within each item. A failed item never
/// blocks the items after it, and both result vectors stay index-aligned
/// with the input list.
pub(crate) async fn dispatch_actions(
    calendar: &dyn CalendarSink,
    notifier: &dyn NotificationSink,
    event_log: &EventLog,
    extraction: &Extraction,
) -> ExecutionResults {
    let start = Instant::now();
    let mut calendar_results = Vec::with_capacity(extraction.items.len());
    let mut send_results = Vec::with_capacity(extraction.items.len());

    for item in &extraction.items {
        let description = format!(
            "Owner: {}, Priority: {}",
            item.owner_name(),
            item.effective_priority()
        );
        let event = calendar
            .create_event(item.task_title(), &description, item.due_date_text())
            .await;
        calendar_results.push(event);

        let sent = notifier
            .send_action(
                item.task_title(),
                item.owner_name(),
                item.due_date_text(),
                item.effective_priority(),
            )
            .await;
        if !sent.ok {
            event_log.record(
                "DiscordError",
                &format!("{:?}", item),
                sent.error.as_deref().unwrap_or(""),
            );
        }
        send_results.push(sent);
    }

    let metrics = Metrics {
        num_actions: extraction.items.len(),
        execution_time_sec: round2(start.elapsed().as_secs_f64()),
    };

    event_log.record(
        "ExecutionAgent",
        &extraction.actions_json,
        &serde_json::to_string(&calendar_results).unwrap_or_default(),
    );
    event_log.record(
        "Metrics",
        &format!("{:?}", metrics),
        &serde_json::to_string(&send_results).unwrap_or_default(),
    );

    ExecutionResults {
        calendar_results,
        send_results,
        metrics,
    }
}

fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
