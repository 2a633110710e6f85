use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{DailyEntry, DailyEntryInput, StreakMetric};
use coach_storage::traits::DailyEntryStore;
use coach_storage::{EntryQuery, SortOrder, StorageBackend};

use crate::{ServiceError, StreakService};

/// Daily tracker entries and the streaks they feed.
pub struct TrackerService {
    storage: Arc<StorageBackend>,
    streaks: Arc<StreakService>,
}

impl TrackerService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, streaks: Arc<StreakService>) -> Self {
        Self { storage, streaks }
    }

    /// Upsert the entry for the input's calendar date, then advance the
    /// streaks it qualifies for. Streaks are keyed on the entry's date, so
    /// back-filling an older day never moves a streak backwards.
    pub async fn save_entry(
        &self,
        user_id: &str,
        input: &DailyEntryInput,
    ) -> Result<DailyEntry, ServiceError> {
        let date = input.validated_date()?;
        let entry = self
            .storage
            .upsert_daily_entry(user_id, date, input.week_number, &input.fields)
            .await?;
        tracing::info!(user_id, %date, week = entry.week_number, "daily entry saved");

        if input.fields.has_high_impact_step() {
            self.streaks.record_activity(user_id, StreakMetric::MeaningfulStep, date).await?;
        }
        if input.fields.used_micro_step() {
            self.streaks.record_activity(user_id, StreakMetric::MicroStepUsed, date).await?;
        }
        Ok(entry)
    }

    /// Entries filtered by date and/or week, newest first.
    pub async fn list_entries(
        &self,
        user_id: &str,
        date: Option<NaiveDate>,
        week_number: Option<u8>,
    ) -> Result<Vec<DailyEntry>, ServiceError> {
        let query = EntryQuery { date, week_number, since: None, order: SortOrder::Descending };
        Ok(self.storage.list_daily_entries(user_id, &query).await?)
    }
}
