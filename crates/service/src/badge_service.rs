use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{Badge, BadgeCode, BadgeFailurePolicy, EarnedBadge, badge_catalog};
use coach_storage::StorageBackend;
use coach_storage::traits::BadgeStore;

use crate::ServiceError;

/// Awards badges and reads them back with their catalog metadata.
pub struct BadgeService {
    storage: Arc<StorageBackend>,
    policy: BadgeFailurePolicy,
}

impl BadgeService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, policy: BadgeFailurePolicy) -> Self {
        Self { storage, policy }
    }

    #[must_use]
    pub fn catalog(&self) -> Vec<Badge> {
        badge_catalog()
    }

    /// Earned badges, newest first.
    pub async fn earned(&self, user_id: &str) -> Result<Vec<EarnedBadge>, ServiceError> {
        let awards = self.storage.list_user_badges(user_id).await?;
        Ok(awards.iter().map(EarnedBadge::from).collect())
    }

    /// Returns `true` when the badge was newly awarded.
    ///
    /// Called after the triggering record is already saved. Under
    /// [`BadgeFailurePolicy::LogAndContinue`] a storage failure is logged and
    /// reported as "not awarded" so the caller's save still succeeds.
    pub async fn award(
        &self,
        user_id: &str,
        code: BadgeCode,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, ServiceError> {
        match self.storage.award_badge(user_id, code, earned_at).await {
            Ok(true) => {
                tracing::info!(user_id, badge = %code, "badge awarded");
                Ok(true)
            },
            Ok(false) => Ok(false),
            Err(e) => match self.policy {
                BadgeFailurePolicy::Propagate => Err(e.into()),
                BadgeFailurePolicy::LogAndContinue => {
                    tracing::warn!(user_id, badge = %code, error = %e, "badge award failed");
                    Ok(false)
                },
            },
        }
    }
}
