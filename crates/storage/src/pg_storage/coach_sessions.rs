//! CoachSessionStore implementation for PgStorage.

use async_trait::async_trait;
use coach_core::{CoachSession, HistoryFilter, InteractionMode};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, decode_json, small_to_u8, usize_to_i64};
use crate::error::StorageError;
use crate::traits::CoachSessionStore;

/// `seq` is assigned by the database and only breaks `created_at` ties.
const SESSION_COLUMNS: &str =
    "id, user_id, interaction_type, week_number, messages, summary, created_at";

fn row_to_coach_session(row: &PgRow) -> Result<CoachSession, StorageError> {
    Ok(CoachSession {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        interaction_type: row.try_get::<String, _>("interaction_type")?.parse::<InteractionMode>()?,
        week_number: small_to_u8(row.try_get("week_number")?, "week_number")?,
        messages: decode_json(row.try_get("messages")?, "messages")?,
        summary: row.try_get("summary")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CoachSessionStore for PgStorage {
    async fn append_coach_session(&self, session: &CoachSession) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO coach_sessions ({SESSION_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(session.interaction_type.as_str())
        .bind(i16::from(session.week_number))
        .bind(serde_json::to_value(&session.messages)?)
        .bind(&session.summary)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_coach_sessions(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<CoachSession>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM coach_sessions
             WHERE user_id = $1
               AND interaction_type = $2
               AND ($3::SMALLINT IS NULL OR week_number = $3)
             ORDER BY created_at DESC, seq DESC
             LIMIT $4"
        ))
        .bind(&filter.user_id)
        .bind(filter.interaction_type.as_str())
        .bind(filter.week_number.map(i16::from))
        .bind(usize_to_i64(filter.limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_coach_session).collect()
    }

    async fn latest_coach_session(
        &self,
        user_id: &str,
    ) -> Result<Option<CoachSession>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM coach_sessions
             WHERE user_id = $1 ORDER BY created_at DESC, seq DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_coach_session(&r)).transpose()
    }
}
