use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority level of an action item.
///
/// Extraction output is only trusted to contain one of the three literal
/// levels; anything else falls back to `Medium` when the item is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Parses a raw priority string, defaulting missing or invalid values
    /// to `Medium`.
    pub fn parse_or_medium(raw: Option<&str>) -> Priority {
        match raw {
            Some("HIGH") => Priority::High,
            Some("LOW") => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single action item extracted from a cleaned transcript.
///
/// All fields are optional on the wire: the extraction model occasionally
/// omits keys or emits nulls, and one malformed entry must never fail
/// deserialization of the whole list. Consumers go through the accessor
/// methods, which supply the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl ActionItem {
    pub fn task_title(&self) -> &str {
        self.task
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled task")
    }

    pub fn owner_name(&self) -> &str {
        self.owner
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or("Unassigned")
    }

    pub fn due_date_text(&self) -> &str {
        self.due_date.as_deref().unwrap_or("unspecified date")
    }

    pub fn effective_priority(&self) -> Priority {
        Priority::parse_or_medium(self.priority.as_deref())
    }
}

/// Persisted record of one successful pipeline run.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Meeting {
    pub id: i64,
    pub raw_transcript: String,
    pub cleaned_transcript: String,
    pub actions: String,
    pub created_at: DateTime<Utc>,
}

/// Echo returned by the calendar sink for one action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub status: String,
    pub title: String,
    pub date: String,
    pub description: String,
}

/// Outcome of one notification delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendResult {
    pub fn delivered() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub num_actions: usize,
    pub execution_time_sec: f64,
}

/// Aggregate outcome of the dispatch stage. Both result vectors are
/// index-aligned with the action item list that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResults {
    pub calendar_results: Vec<CalendarEventResult>,
    pub send_results: Vec<SendResult>,
    pub metrics: Metrics,
}

/// Final result of one orchestrator run.
///
/// Serialized untagged so the three shapes match what callers see on the
/// wire: a bare `{error}` for rejected input, an error object with empty
/// stage fields for a failed cleaning pass, and the full payload on success.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PipelineResult {
    Rejected {
        error: String,
    },
    Failed {
        error: String,
        cleaned_transcript: String,
        actions: String,
        execution_results: serde_json::Value,
    },
    Completed {
        meeting_id: i64,
        cleaned_transcript: String,
        actions: String,
        execution_results: ExecutionResults,
    },
}
