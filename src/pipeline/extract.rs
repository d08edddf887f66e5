use chrono::Local;

use crate::event_log::EventLog;
use crate::llm::TextGenerator;
use crate::models::ActionItem;

const OUTPUT_FORMAT: &str = r#"[
  {
    "task": "...",
    "owner": "... or null",
    "due_date": "YYYY-MM-DD or null",
    "priority": "HIGH" | "MEDIUM" | "LOW"
  },
  ...
]"#;

/// Validated output of the extraction stage: the raw JSON text that will be
/// persisted, plus the parsed list that drives dispatch. The two always
/// agree; a failed parse collapses both to empty.
pub(crate) struct Extraction {
    pub actions_json: String,
    pub items: Vec<ActionItem>,
}

impl Extraction {
    fn empty() -> Self {
        Self {
            actions_json: "[]".to_string(),
            items: Vec::new(),
        }
    }
}

fn system_instruction(system_date: &str) -> String {
    format!(
        "You are an action extraction agent. \
         Your job is to read a cleaned meeting transcript and extract ALL action items. \
         Use the system date ({date}) as reference for the entire due dates. \
         Each action item must include: task, owner (if known), due_date (if known), \
         priority (HIGH/MEDIUM/LOW). \
         If owner or due_date is not clear, set them to null. \
         For each line, if a task is mentioned, use the speaker as the owner unless the \
         task is clearly assigned to someone else. \
         Extract due dates from phrases like 'by Thursday', 'by Wednesday evening', \
         'Friday 3 PM', etc., and use the system date ({date}) as reference. \
         If a time is mentioned, include it in the due_date in a globally accessible \
         format, e.g., 'YYYY-MM-DD 3:00 PM', not ISO THH:MM:SS. Use AM/PM notation for times. \
         If the transcript mentions missed SLAs, tickets, or issues, create an action item \
         to investigate or follow up, including ticket numbers or identifiers. \
         For investigation or follow-up tasks (e.g., 'Root cause?'), assign the speaker as \
         the owner unless another person is clearly responsible. \
         If a high-priority investigation or incident follow-up task does not have a \
         specified due date, set the due date to the next business day after the meeting \
         (e.g., if the meeting is on the system date, use the next business day, \
         skipping Saturday and Sunday).",
        date = system_date
    )
}

/// Derives the action item list from a cleaned transcript with one
/// generation call. Degrades to an empty list on generation failure or
/// malformed output; the two causes are distinguishable in the event log
/// but never surface as errors.
pub(crate) async fn extract_actions(
    generator: &dyn TextGenerator,
    event_log: &EventLog,
    cleaned_text: &str,
) -> Extraction {
    let system_date = Local::now().format("%Y-%m-%d").to_string();
    let user_instruction = format!(
        "Extract all action items from this meeting transcript. \
         Return ONLY valid JSON in the following format:\n\n{}\n\nTranscript:\n{}",
        OUTPUT_FORMAT, cleaned_text
    );

    let Some(raw) = generator
        .generate(&system_instruction(&system_date), &user_instruction)
        .await
    else {
        // Generation fault already logged under GeminiError.
        return Extraction::empty();
    };

    if raw.trim().is_empty() {
        return Extraction::empty();
    }

    match serde_json::from_str::<Vec<ActionItem>>(&raw) {
        Ok(items) => {
            event_log.record("ActionAgent", cleaned_text, &raw);
            Extraction {
                actions_json: raw,
                items,
            }
        }
        Err(e) => {
            event_log.record("ActionAgentParseError", &raw, &e.to_string());
            Extraction::empty()
        }
    }
}
