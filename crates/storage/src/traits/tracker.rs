use async_trait::async_trait;
use chrono::NaiveDate;
use coach_core::{DailyEntry, DailyFields, Streak, StreakMetric};

use crate::error::StorageError;
use crate::types::EntryQuery;

/// Daily tracker entries, unique per (user, date).
#[async_trait]
pub trait DailyEntryStore: Send + Sync {
    /// Create the entry for `date` or overwrite the tracked fields of the
    /// existing one. `week_number` is only written on creation.
    async fn upsert_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        week_number: u8,
        fields: &DailyFields,
    ) -> Result<DailyEntry, StorageError>;

    async fn get_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyEntry>, StorageError>;

    /// List entries matching `query`, ordered by date.
    async fn list_daily_entries(
        &self,
        user_id: &str,
        query: &EntryQuery,
    ) -> Result<Vec<DailyEntry>, StorageError>;
}

/// Streak rows, unique per (user, metric).
#[async_trait]
pub trait StreakStore: Send + Sync {
    async fn get_streak(
        &self,
        user_id: &str,
        metric: StreakMetric,
    ) -> Result<Option<Streak>, StorageError>;

    /// Upsert on (user, metric). Concurrent writers: last write wins.
    async fn save_streak(&self, streak: &Streak) -> Result<(), StorageError>;

    async fn list_streaks(&self, user_id: &str) -> Result<Vec<Streak>, StorageError>;
}
