//! PatternStore implementation for PgStorage.

use async_trait::async_trait;
use coach_core::{PatternInput, ProcrastinationPattern};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::{PgStorage, decode_json};
use crate::error::StorageError;
use crate::traits::PatternStore;

const PATTERN_COLUMNS: &str =
    "id, user_id, description, pattern_type, micro_step, trigger_phrases, created_at";

fn row_to_pattern(row: &PgRow) -> Result<ProcrastinationPattern, StorageError> {
    Ok(ProcrastinationPattern {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        description: row.try_get("description")?,
        pattern_type: row.try_get("pattern_type")?,
        micro_step: row.try_get("micro_step")?,
        trigger_phrases: decode_json(row.try_get("trigger_phrases")?, "trigger_phrases")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PatternStore for PgStorage {
    async fn create_pattern(
        &self,
        user_id: &str,
        input: &PatternInput,
    ) -> Result<ProcrastinationPattern, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO procrastination_patterns ({PATTERN_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING {PATTERN_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(&input.description)
        .bind(&input.pattern_type)
        .bind(&input.micro_step)
        .bind(serde_json::to_value(&input.trigger_phrases)?)
        .fetch_one(&self.pool)
        .await?;
        row_to_pattern(&row)
    }

    async fn list_patterns(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProcrastinationPattern>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PATTERN_COLUMNS} FROM procrastination_patterns
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_pattern).collect()
    }

    async fn count_patterns(&self, user_id: &str) -> Result<i64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM procrastination_patterns WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn get_pattern_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<ProcrastinationPattern>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {PATTERN_COLUMNS} FROM procrastination_patterns WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_pattern(&r)).transpose()
    }

    async fn delete_pattern(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM procrastination_patterns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
