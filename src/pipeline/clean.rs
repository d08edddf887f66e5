use crate::event_log::EventLog;
use crate::llm::TextGenerator;

/// Prefix marking a cleaning failure. The orchestrator treats any cleaning
/// output that starts with this as a hard stop for the run.
pub const FAILED_PREFIX: &str = "FAILED:";

const SYSTEM_INSTRUCTION: &str = "You are a meeting ingestion agent. \
    You clean transcripts, remove filler words, fix obvious typos, \
    and keep speaker names and structure. \
    You do NOT invent content.";

/// Normalizes a raw transcript with one generation call, primed with prior
/// meeting context. Generation failure yields the sentinel string instead
/// of an error.
pub(crate) async fn clean_transcript(
    generator: &dyn TextGenerator,
    event_log: &EventLog,
    raw_text: &str,
    context: &str,
) -> String {
    let user_instruction = format!(
        "Here is some project context from previous meetings (may be empty):\n\
         {}\n\n\
         Now clean the following new meeting transcript. \
         Return only the cleaned transcript text.\n\n\
         --- RAW TRANSCRIPT ---\n{}",
        context, raw_text
    );

    match generator.generate(SYSTEM_INSTRUCTION, &user_instruction).await {
        Some(cleaned) => {
            event_log.record("IngestionAgent", raw_text, &cleaned);
            cleaned
        }
        None => format!(
            "{} LLM could not process this transcript. Possibly too large or invalid.",
            FAILED_PREFIX
        ),
    }
}
