//! BadgeStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, UserBadge};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::BadgeStore;

fn row_to_user_badge(row: &PgRow) -> Result<UserBadge, StorageError> {
    Ok(UserBadge {
        user_id: row.try_get("user_id")?,
        badge_code: row.try_get::<String, _>("badge_code")?.parse::<BadgeCode>()?,
        earned_at: row.try_get("earned_at")?,
    })
}

#[async_trait]
impl BadgeStore for PgStorage {
    async fn award_badge(
        &self,
        user_id: &str,
        code: BadgeCode,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT INTO user_badges (user_id, badge_code, earned_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, badge_code) DO NOTHING",
        )
        .bind(user_id)
        .bind(code.as_str())
        .bind(earned_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>, StorageError> {
        let rows = sqlx::query(
            "SELECT user_id, badge_code, earned_at FROM user_badges
             WHERE user_id = $1 ORDER BY earned_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_user_badge).collect()
    }
}
