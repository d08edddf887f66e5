//! The pipeline orchestration core: a fixed-order sequence of fallible
//! stages, each degrading rather than panicking, producing one aggregated
//! result per run.
//!
//! `START → SIZE_CHECK → CONTEXT → CLEAN → (FAIL_CLEAN | EXTRACT) →
//! DISPATCH → PERSIST → DONE`

mod clean;
mod context;
mod dispatch;
mod extract;

pub use clean::FAILED_PREFIX;

use std::sync::Arc;

use crate::event_log::EventLog;
use crate::llm::TextGenerator;
use crate::models::PipelineResult;
use crate::sinks::{CalendarSink, NotificationSink};
use crate::store::{MeetingStore, StoreError};

/// Hard limit on raw transcript size, in characters. Oversized input is
/// rejected before any stage runs: nothing is logged, nothing is persisted.
pub const MAX_TRANSCRIPT_CHARS: usize = 15_000;

/// The orchestrator. Holds every collaborator behind a trait object so a
/// run can be exercised end to end with fakes.
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    calendar: Arc<dyn CalendarSink>,
    notifier: Arc<dyn NotificationSink>,
    store: Arc<dyn MeetingStore>,
    event_log: EventLog,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        calendar: Arc<dyn CalendarSink>,
        notifier: Arc<dyn NotificationSink>,
        store: Arc<dyn MeetingStore>,
        event_log: EventLog,
    ) -> Self {
        Self {
            generator,
            calendar,
            notifier,
            store,
            event_log,
        }
    }

    /// Runs the full pipeline over one raw transcript.
    ///
    /// Returns `Ok` for every handled outcome, including rejected input and
    /// cleaning failure; `Err` only for a persistence fault, which the HTTP
    /// boundary converts to a 5xx response.
    pub async fn process_meeting(&self, raw_text: &str) -> Result<PipelineResult, StoreError> {
        if raw_text.chars().count() > MAX_TRANSCRIPT_CHARS {
            return Ok(PipelineResult::Rejected {
                error: "Transcript too large. Please upload a smaller file (max ~15k characters)."
                    .to_string(),
            });
        }

        let context = context::recent_context(self.store.as_ref()).await?;

        let cleaned = clean::clean_transcript(
            self.generator.as_ref(),
            &self.event_log,
            raw_text,
            &context,
        )
        .await;
        if cleaned.starts_with(FAILED_PREFIX) {
            return Ok(PipelineResult::Failed {
                error: cleaned,
                cleaned_transcript: String::new(),
                actions: "[]".to_string(),
                execution_results: serde_json::json!({}),
            });
        }

        // Extraction always proceeds, possibly yielding an empty list;
        // dispatch then simply reports zero actions processed.
        let extraction =
            extract::extract_actions(self.generator.as_ref(), &self.event_log, &cleaned).await;

        let execution_results = dispatch::dispatch_actions(
            self.calendar.as_ref(),
            self.notifier.as_ref(),
            &self.event_log,
            &extraction,
        )
        .await;

        let meeting = self
            .store
            .insert_meeting(raw_text, &cleaned, &extraction.actions_json)
            .await?;

        Ok(PipelineResult::Completed {
            meeting_id: meeting.id,
            cleaned_transcript: cleaned,
            actions: extraction.actions_json,
            execution_results,
        })
    }
}
