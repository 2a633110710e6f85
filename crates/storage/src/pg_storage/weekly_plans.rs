//! WeeklyPlanStore implementation for PgStorage.

use async_trait::async_trait;
use coach_core::{WeeklyPlan, WeeklyPlanInput};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::{PgStorage, decode_json, small_to_u8};
use crate::error::StorageError;
use crate::traits::WeeklyPlanStore;

const PLAN_COLUMNS: &str = "id, user_id, week_number, high_value_tasks, admin_tasks, \
    low_value_tasks, focus_blocks, notes, created_at, updated_at";

fn row_to_weekly_plan(row: &PgRow) -> Result<WeeklyPlan, StorageError> {
    Ok(WeeklyPlan {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        week_number: small_to_u8(row.try_get("week_number")?, "week_number")?,
        high_value_tasks: decode_json(row.try_get("high_value_tasks")?, "high_value_tasks")?,
        admin_tasks: decode_json(row.try_get("admin_tasks")?, "admin_tasks")?,
        low_value_tasks: decode_json(row.try_get("low_value_tasks")?, "low_value_tasks")?,
        focus_blocks: decode_json(row.try_get("focus_blocks")?, "focus_blocks")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl WeeklyPlanStore for PgStorage {
    async fn upsert_weekly_plan(
        &self,
        user_id: &str,
        input: &WeeklyPlanInput,
    ) -> Result<WeeklyPlan, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO weekly_plans ({PLAN_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
             ON CONFLICT (user_id, week_number) DO UPDATE SET
               high_value_tasks = EXCLUDED.high_value_tasks,
               admin_tasks = EXCLUDED.admin_tasks,
               low_value_tasks = EXCLUDED.low_value_tasks,
               focus_blocks = EXCLUDED.focus_blocks,
               notes = EXCLUDED.notes,
               updated_at = NOW()
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(i16::from(input.week_number))
        .bind(serde_json::to_value(&input.high_value_tasks)?)
        .bind(serde_json::to_value(&input.admin_tasks)?)
        .bind(serde_json::to_value(&input.low_value_tasks)?)
        .bind(serde_json::to_value(&input.focus_blocks)?)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await?;
        row_to_weekly_plan(&row)
    }

    async fn get_weekly_plan(
        &self,
        user_id: &str,
        week_number: u8,
    ) -> Result<Option<WeeklyPlan>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {PLAN_COLUMNS} FROM weekly_plans WHERE user_id = $1 AND week_number = $2"
        ))
        .bind(user_id)
        .bind(i16::from(week_number))
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_weekly_plan(&r)).transpose()
    }
}
