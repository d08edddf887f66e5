use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::Meeting;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary of the pipeline.
///
/// The orchestrator is the only writer; the context retriever is the only
/// other reader, and it sees just the newest cleaned transcripts.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Inserts one meeting record and reads back the assigned row,
    /// including its generated id and creation timestamp.
    async fn insert_meeting(
        &self,
        raw_transcript: &str,
        cleaned_transcript: &str,
        actions: &str,
    ) -> Result<Meeting, StoreError>;

    /// Cleaned transcripts of the most recent meetings, newest first.
    async fn recent_cleaned_transcripts(&self, limit: i64) -> Result<Vec<String>, StoreError>;
}

pub struct PgMeetingStore {
    pool: PgPool,
}

impl PgMeetingStore {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl MeetingStore for PgMeetingStore {
    async fn insert_meeting(
        &self,
        raw_transcript: &str,
        cleaned_transcript: &str,
        actions: &str,
    ) -> Result<Meeting, StoreError> {
        let meeting = sqlx::query_as::<_, Meeting>(
            r#"
            INSERT INTO meetings (raw_transcript, cleaned_transcript, actions)
            VALUES ($1, $2, $3)
            RETURNING id, raw_transcript, cleaned_transcript, actions, created_at
            "#,
        )
        .bind(raw_transcript)
        .bind(cleaned_transcript)
        .bind(actions)
        .fetch_one(&self.pool)
        .await?;

        Ok(meeting)
    }

    async fn recent_cleaned_transcripts(&self, limit: i64) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT cleaned_transcript
            FROM meetings
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }
}
