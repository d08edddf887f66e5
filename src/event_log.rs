use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Maximum number of characters kept from each input/output excerpt.
pub const EXCERPT_CHARS: usize = 300;

/// Append-only audit trail of pipeline stage inputs and outputs.
///
/// One line per event: timestamp, category, truncated input excerpt,
/// truncated output excerpt. Each append is a single write to a file opened
/// in append mode, so lines from concurrent runs never interleave.
/// Logging is best-effort: an I/O failure is reported via tracing and
/// swallowed, it never fails the run being audited.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, category: &str, input: &str, output: &str) {
        let line = format!(
            "[{}] {} | INPUT: {} | OUTPUT: {}\n",
            Utc::now().to_rfc3339(),
            category,
            excerpt(input),
            excerpt(output),
        );
        if let Err(e) = self.append(&line) {
            warn!("Failed to append to event log {:?}: {}", self.path, e);
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// Truncates to the first `EXCERPT_CHARS` characters. Counted in characters,
/// not bytes, so multibyte input never splits a code point.
fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn input_excerpt(line: &str) -> String {
        let rest = line.split_once(" | INPUT: ").unwrap().1;
        rest.split_once(" | OUTPUT: ").unwrap().0.to_string()
    }

    #[test]
    fn excerpt_fields_are_exactly_first_300_chars() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("agent_logs.txt"));

        let input: String = "x".repeat(400);
        log.record("IngestionAgent", &input, "out");
        log.record("IngestionAgent", &input, "out");

        let lines = read_lines(&dir.path().join("agent_logs.txt"));
        assert_eq!(lines.len(), 2);
        let expected: String = input.chars().take(300).collect();
        assert_eq!(input_excerpt(&lines[0]), expected);
        assert_eq!(input_excerpt(&lines[1]), expected);
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("agent_logs.txt"));

        // 400 multibyte characters; byte-indexed truncation would panic.
        let input: String = "é".repeat(400);
        log.record("ActionAgent", &input, "");

        let lines = read_lines(&dir.path().join("agent_logs.txt"));
        assert_eq!(input_excerpt(&lines[0]).chars().count(), 300);
    }

    #[test]
    fn record_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/agent_logs.txt");
        let log = EventLog::new(&path);

        log.record("Metrics", "in", "out");
        assert!(path.exists());
    }
}
