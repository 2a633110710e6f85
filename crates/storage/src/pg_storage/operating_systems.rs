//! OperatingSystemStore implementation for PgStorage.

use async_trait::async_trait;
use coach_core::{OperatingSystem, OperatingSystemInput};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, decode_json};
use crate::error::StorageError;
use crate::traits::OperatingSystemStore;

const OS_COLUMNS: &str =
    "user_id, planning_rules, anti_procrastination_rules, visible_changes, ai_summary, updated_at";

fn row_to_operating_system(row: &PgRow) -> Result<OperatingSystem, StorageError> {
    Ok(OperatingSystem {
        user_id: row.try_get("user_id")?,
        planning_rules: decode_json(row.try_get("planning_rules")?, "planning_rules")?,
        anti_procrastination_rules: decode_json(
            row.try_get("anti_procrastination_rules")?,
            "anti_procrastination_rules",
        )?,
        visible_changes: decode_json(row.try_get("visible_changes")?, "visible_changes")?,
        ai_summary: row.try_get("ai_summary")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl OperatingSystemStore for PgStorage {
    async fn upsert_operating_system(
        &self,
        user_id: &str,
        input: &OperatingSystemInput,
    ) -> Result<OperatingSystem, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO operating_systems ({OS_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
               planning_rules = EXCLUDED.planning_rules,
               anti_procrastination_rules = EXCLUDED.anti_procrastination_rules,
               visible_changes = EXCLUDED.visible_changes,
               ai_summary = EXCLUDED.ai_summary,
               updated_at = NOW()
             RETURNING {OS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(serde_json::to_value(&input.planning_rules)?)
        .bind(serde_json::to_value(&input.anti_procrastination_rules)?)
        .bind(serde_json::to_value(&input.visible_changes)?)
        .bind(&input.ai_summary)
        .fetch_one(&self.pool)
        .await?;
        row_to_operating_system(&row)
    }

    async fn get_operating_system(
        &self,
        user_id: &str,
    ) -> Result<Option<OperatingSystem>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {OS_COLUMNS} FROM operating_systems WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_operating_system(&r)).transpose()
    }
}
