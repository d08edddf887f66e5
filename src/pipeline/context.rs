use crate::store::{MeetingStore, StoreError};

const CONTEXT_MEETINGS: i64 = 3;
const CONTEXT_EXCERPT_CHARS: usize = 500;

/// Builds the prior-meeting context used to prime the cleaning stage.
///
/// Reads the cleaned transcripts of up to three most recent meetings and
/// joins a 500-character excerpt of each under a labeled header. Empty when
/// no history exists. A read fault aborts the run: retrieval shares the
/// orchestrator's store, so there is no best-effort fallback here.
pub(crate) async fn recent_context(store: &dyn MeetingStore) -> Result<String, StoreError> {
    let transcripts = store.recent_cleaned_transcripts(CONTEXT_MEETINGS).await?;
    if transcripts.is_empty() {
        return Ok(String::new());
    }

    let chunks: Vec<String> = transcripts
        .iter()
        .map(|t| {
            let excerpt: String = t.chars().take(CONTEXT_EXCERPT_CHARS).collect();
            format!("- Previous meeting summary:\n{}", excerpt)
        })
        .collect();

    Ok(chunks.join("\n\n"))
}
