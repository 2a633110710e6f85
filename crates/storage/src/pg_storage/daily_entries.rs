//! DailyEntryStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::NaiveDate;
use coach_core::{DailyEntry, DailyFields, FocusBlockStatus};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::{PgStorage, opt_small_to_u8, small_to_u8};
use crate::error::StorageError;
use crate::traits::DailyEntryStore;
use crate::types::EntryQuery;

const DAILY_COLUMNS: &str = "id, user_id, date, week_number, engaged_today, day_feeling, \
    frustration_note, focus_block_done, high_impact_step, disruption_reason, \
    procrastination_event, micro_step_used, micro_step_context, system_alignment, \
    positive_event, created_at, updated_at";

fn row_to_daily_entry(row: &PgRow) -> Result<DailyEntry, StorageError> {
    let focus_block_done = row
        .try_get::<Option<String>, _>("focus_block_done")?
        .map(|s| s.parse::<FocusBlockStatus>())
        .transpose()?;
    Ok(DailyEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        date: row.try_get("date")?,
        week_number: small_to_u8(row.try_get("week_number")?, "week_number")?,
        fields: DailyFields {
            engaged_today: row.try_get("engaged_today")?,
            day_feeling: opt_small_to_u8(row.try_get("day_feeling")?, "day_feeling")?,
            frustration_note: row.try_get("frustration_note")?,
            focus_block_done,
            high_impact_step: row.try_get("high_impact_step")?,
            disruption_reason: row.try_get("disruption_reason")?,
            procrastination_event: row.try_get("procrastination_event")?,
            micro_step_used: row.try_get("micro_step_used")?,
            micro_step_context: row.try_get("micro_step_context")?,
            system_alignment: opt_small_to_u8(row.try_get("system_alignment")?, "system_alignment")?,
            positive_event: row.try_get("positive_event")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl DailyEntryStore for PgStorage {
    async fn upsert_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        week_number: u8,
        fields: &DailyFields,
    ) -> Result<DailyEntry, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO daily_entries ({DAILY_COLUMNS})
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,NOW(),NOW())
             ON CONFLICT (user_id, date) DO UPDATE SET
               engaged_today = COALESCE(EXCLUDED.engaged_today, daily_entries.engaged_today),
               day_feeling = COALESCE(EXCLUDED.day_feeling, daily_entries.day_feeling),
               frustration_note = COALESCE(EXCLUDED.frustration_note, daily_entries.frustration_note),
               focus_block_done = COALESCE(EXCLUDED.focus_block_done, daily_entries.focus_block_done),
               high_impact_step = COALESCE(EXCLUDED.high_impact_step, daily_entries.high_impact_step),
               disruption_reason = COALESCE(EXCLUDED.disruption_reason, daily_entries.disruption_reason),
               procrastination_event = COALESCE(EXCLUDED.procrastination_event, daily_entries.procrastination_event),
               micro_step_used = COALESCE(EXCLUDED.micro_step_used, daily_entries.micro_step_used),
               micro_step_context = COALESCE(EXCLUDED.micro_step_context, daily_entries.micro_step_context),
               system_alignment = COALESCE(EXCLUDED.system_alignment, daily_entries.system_alignment),
               positive_event = COALESCE(EXCLUDED.positive_event, daily_entries.positive_event),
               updated_at = NOW()
             RETURNING {DAILY_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(date)
        .bind(i16::from(week_number))
        .bind(fields.engaged_today)
        .bind(fields.day_feeling.map(i16::from))
        .bind(&fields.frustration_note)
        .bind(fields.focus_block_done.map(|s| s.as_str()))
        .bind(&fields.high_impact_step)
        .bind(&fields.disruption_reason)
        .bind(fields.procrastination_event)
        .bind(fields.micro_step_used)
        .bind(&fields.micro_step_context)
        .bind(fields.system_alignment.map(i16::from))
        .bind(&fields.positive_event)
        .fetch_one(&self.pool)
        .await?;
        row_to_daily_entry(&row)
    }

    async fn get_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyEntry>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {DAILY_COLUMNS} FROM daily_entries WHERE user_id = $1 AND date = $2"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_daily_entry(&r)).transpose()
    }

    async fn list_daily_entries(
        &self,
        user_id: &str,
        query: &EntryQuery,
    ) -> Result<Vec<DailyEntry>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {DAILY_COLUMNS} FROM daily_entries
             WHERE user_id = $1
               AND ($2::DATE IS NULL OR date = $2)
               AND ($3::SMALLINT IS NULL OR week_number = $3)
               AND ($4::DATE IS NULL OR date >= $4)
             ORDER BY date {}",
            query.order.as_sql()
        ))
        .bind(user_id)
        .bind(query.date)
        .bind(query.week_number.map(i16::from))
        .bind(query.since)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_daily_entry).collect()
    }
}
