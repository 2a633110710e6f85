use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{week_start, weekly_score};
use coach_storage::traits::DailyEntryStore;
use coach_storage::{EntryQuery, SortOrder, StorageBackend};

use crate::ServiceError;

pub struct GamificationService {
    storage: Arc<StorageBackend>,
}

impl GamificationService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Score for `week_number` over entries dated from the Monday of
    /// `today`'s ISO week onwards.
    pub async fn weekly_score(
        &self,
        user_id: &str,
        week_number: u8,
        today: NaiveDate,
    ) -> Result<u8, ServiceError> {
        let start = week_start(today);
        let query = EntryQuery {
            week_number: Some(week_number),
            order: SortOrder::Ascending,
            ..EntryQuery::since(start)
        };
        let entries = self.storage.list_daily_entries(user_id, &query).await?;
        let score = weekly_score(&entries, start, week_number);
        tracing::debug!(user_id, week = week_number, %start, entries = entries.len(), score, "weekly score");
        Ok(score)
    }
}
