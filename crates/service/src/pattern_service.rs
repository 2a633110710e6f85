use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, PATTERNS_FOR_BADGE, PatternInput, ProcrastinationPattern};
use coach_storage::StorageBackend;
use coach_storage::traits::PatternStore;

use crate::{BadgeService, ServiceError};

pub struct PatternService {
    storage: Arc<StorageBackend>,
    badges: Arc<BadgeService>,
}

impl PatternService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, badges: Arc<BadgeService>) -> Self {
        Self { storage, badges }
    }

    /// Newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ProcrastinationPattern>, ServiceError> {
        Ok(self.storage.list_patterns(user_id).await?)
    }

    pub async fn create(
        &self,
        user_id: &str,
        input: &PatternInput,
        now: DateTime<Utc>,
    ) -> Result<ProcrastinationPattern, ServiceError> {
        input.validate()?;
        let pattern = self.storage.create_pattern(user_id, input).await?;
        let owned = self.storage.count_patterns(user_id).await?;
        tracing::info!(user_id, pattern_id = %pattern.id, owned, "procrastination pattern saved");
        if owned >= PATTERNS_FOR_BADGE {
            self.badges.award(user_id, BadgeCode::AntiProcrastPatterns, now).await?;
        }
        Ok(pattern)
    }

    /// Deletes only a pattern the user owns; anything else is `NotFound`.
    pub async fn delete(&self, user_id: &str, pattern_id: &str) -> Result<(), ServiceError> {
        let not_found =
            || ServiceError::NotFound { entity: "pattern", id: pattern_id.to_owned() };
        if self.storage.get_pattern_for_user(pattern_id, user_id).await?.is_none() {
            return Err(not_found());
        }
        if !self.storage.delete_pattern(pattern_id).await? {
            return Err(not_found());
        }
        tracing::info!(user_id, pattern_id, "procrastination pattern deleted");
        Ok(())
    }
}
