use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{Streak, StreakMetric, StreakUpdate, next_streak};
use coach_storage::StorageBackend;
use coach_storage::traits::StreakStore;

use crate::ServiceError;

pub struct StreakService {
    storage: Arc<StorageBackend>,
}

impl StreakService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Register activity on `today` for one metric.
    ///
    /// Reads the stored streak, applies the day transition and writes it
    /// back unless nothing changed. Concurrent first writes for the same
    /// (user, metric) are not serialized; the last upsert wins.
    pub async fn record_activity(
        &self,
        user_id: &str,
        metric: StreakMetric,
        today: NaiveDate,
    ) -> Result<(Streak, StreakUpdate), ServiceError> {
        let existing = self.storage.get_streak(user_id, metric).await?;
        let (streak, update) = next_streak(existing, user_id, metric, today);
        if update.is_change() {
            self.storage.save_streak(&streak).await?;
            tracing::debug!(
                user_id,
                metric = %metric,
                current = streak.current_streak,
                longest = streak.longest_streak,
                ?update,
                "streak updated"
            );
        }
        Ok((streak, update))
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Streak>, ServiceError> {
        Ok(self.storage.list_streaks(user_id).await?)
    }
}
