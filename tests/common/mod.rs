#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use meetpipe::event_log::EventLog;
use meetpipe::llm::TextGenerator;
use meetpipe::models::{CalendarEventResult, Meeting, Priority, SendResult};
use meetpipe::pipeline::Pipeline;
use meetpipe::sinks::{CalendarSink, NotificationSink};
use meetpipe::store::{MeetingStore, StoreError};

#[derive(Debug, Clone)]
pub struct GeneratorCall {
    pub system_instruction: String,
    pub user_instruction: String,
}

/// Scripted text generator. The cleaning and extraction calls are told
/// apart by the agent named in their system instructions, mirroring the
/// two real prompts.
pub struct FakeGenerator {
    clean_response: Option<String>,
    extract_response: Option<String>,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl FakeGenerator {
    pub fn new(clean_response: Option<&str>, extract_response: Option<&str>) -> Self {
        Self {
            clean_response: clean_response.map(str::to_string),
            extract_response: extract_response.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, system_instruction: &str, user_instruction: &str) -> Option<String> {
        self.calls.lock().unwrap().push(GeneratorCall {
            system_instruction: system_instruction.to_string(),
            user_instruction: user_instruction.to_string(),
        });
        if system_instruction.contains("ingestion agent") {
            self.clean_response.clone()
        } else {
            self.extract_response.clone()
        }
    }
}

/// Calendar fake that records every created event and echoes it back.
#[derive(Default)]
pub struct RecordingCalendar {
    events: Mutex<Vec<CalendarEventResult>>,
}

impl RecordingCalendar {
    pub fn events(&self) -> Vec<CalendarEventResult> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarSink for RecordingCalendar {
    async fn create_event(
        &self,
        title: &str,
        description: &str,
        date: &str,
    ) -> CalendarEventResult {
        let result = CalendarEventResult {
            status: "ok".to_string(),
            title: title.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        };
        self.events.lock().unwrap().push(result.clone());
        result
    }
}

/// Notifier fake; `failing` makes every delivery report an error without
/// raising one.
pub struct RecordingNotifier {
    failing: bool,
    sent: Mutex<Vec<(String, String, String, Priority)>>,
}

impl RecordingNotifier {
    pub fn new(failing: bool) -> Self {
        Self {
            failing,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String, String, Priority)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send_action(
        &self,
        task: &str,
        owner: &str,
        due_date: &str,
        priority: Priority,
    ) -> SendResult {
        self.sent.lock().unwrap().push((
            task.to_string(),
            owner.to_string(),
            due_date.to_string(),
            priority,
        ));
        if self.failing {
            SendResult::failed("HTTP 500: webhook unavailable")
        } else {
            SendResult::delivered()
        }
    }
}

/// In-memory meeting store with sequential ids, newest-last insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    meetings: Mutex<Vec<Meeting>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds prior meetings in creation order (oldest first).
    pub fn seeded(cleaned_transcripts: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut meetings = store.meetings.lock().unwrap();
            for (i, cleaned) in cleaned_transcripts.iter().enumerate() {
                meetings.push(Meeting {
                    id: i as i64 + 1,
                    raw_transcript: format!("raw {}", i + 1),
                    cleaned_transcript: cleaned.to_string(),
                    actions: "[]".to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        store
    }

    pub fn meetings(&self) -> Vec<Meeting> {
        self.meetings.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeetingStore for InMemoryStore {
    async fn insert_meeting(
        &self,
        raw_transcript: &str,
        cleaned_transcript: &str,
        actions: &str,
    ) -> Result<Meeting, StoreError> {
        let mut meetings = self.meetings.lock().unwrap();
        let meeting = Meeting {
            id: meetings.len() as i64 + 1,
            raw_transcript: raw_transcript.to_string(),
            cleaned_transcript: cleaned_transcript.to_string(),
            actions: actions.to_string(),
            created_at: Utc::now(),
        };
        meetings.push(meeting.clone());
        Ok(meeting)
    }

    async fn recent_cleaned_transcripts(&self, limit: i64) -> Result<Vec<String>, StoreError> {
        let meetings = self.meetings.lock().unwrap();
        Ok(meetings
            .iter()
            .rev()
            .take(limit as usize)
            .map(|m| m.cleaned_transcript.clone())
            .collect())
    }
}

/// One fully wired pipeline over fakes, plus handles to inspect them.
pub struct Harness {
    pub pipeline: Pipeline,
    pub generator: Arc<FakeGenerator>,
    pub calendar: Arc<RecordingCalendar>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<InMemoryStore>,
    pub log_path: PathBuf,
    _log_dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(generator: FakeGenerator, notifier: RecordingNotifier, store: InMemoryStore) -> Self {
        let log_dir = tempfile::tempdir().unwrap();
        let log_path = log_dir.path().join("agent_logs.txt");

        let generator = Arc::new(generator);
        let calendar = Arc::new(RecordingCalendar::default());
        let notifier = Arc::new(notifier);
        let store = Arc::new(store);

        let pipeline = Pipeline::new(
            generator.clone(),
            calendar.clone(),
            notifier.clone(),
            store.clone(),
            EventLog::new(&log_path),
        );

        Self {
            pipeline,
            generator,
            calendar,
            notifier,
            store,
            log_path,
            _log_dir: log_dir,
        }
    }

    pub fn event_log_contents(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }
}
