use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, UserBadge};

use crate::error::StorageError;

/// Badge awards, unique per (user, badge).
#[async_trait]
pub trait BadgeStore: Send + Sync {
    /// Award `code` to the user. Returns `true` if newly awarded, `false`
    /// if the user already held it.
    async fn award_badge(
        &self,
        user_id: &str,
        code: BadgeCode,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;

    /// Newest first.
    async fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>, StorageError>;
}
