//! StreakStore implementation for PgStorage.

use async_trait::async_trait;
use coach_core::{Streak, StreakMetric};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, int_to_u32, u32_to_int};
use crate::error::StorageError;
use crate::traits::StreakStore;

const STREAK_COLUMNS: &str = "user_id, metric, current_streak, longest_streak, last_date";

fn row_to_streak(row: &PgRow) -> Result<Streak, StorageError> {
    Ok(Streak {
        user_id: row.try_get("user_id")?,
        metric: row.try_get::<String, _>("metric")?.parse::<StreakMetric>()?,
        current_streak: int_to_u32(row.try_get("current_streak")?, "current_streak")?,
        longest_streak: int_to_u32(row.try_get("longest_streak")?, "longest_streak")?,
        last_date: row.try_get("last_date")?,
    })
}

#[async_trait]
impl StreakStore for PgStorage {
    async fn get_streak(
        &self,
        user_id: &str,
        metric: StreakMetric,
    ) -> Result<Option<Streak>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {STREAK_COLUMNS} FROM streaks WHERE user_id = $1 AND metric = $2"
        ))
        .bind(user_id)
        .bind(metric.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_streak(&r)).transpose()
    }

    async fn save_streak(&self, streak: &Streak) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO streaks ({STREAK_COLUMNS})
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, metric) DO UPDATE SET
               current_streak = EXCLUDED.current_streak,
               longest_streak = EXCLUDED.longest_streak,
               last_date = EXCLUDED.last_date"
        ))
        .bind(&streak.user_id)
        .bind(streak.metric.as_str())
        .bind(u32_to_int(streak.current_streak, "current_streak")?)
        .bind(u32_to_int(streak.longest_streak, "longest_streak")?)
        .bind(streak.last_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_streaks(&self, user_id: &str) -> Result<Vec<Streak>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {STREAK_COLUMNS} FROM streaks WHERE user_id = $1 ORDER BY metric"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_streak).collect()
    }
}
