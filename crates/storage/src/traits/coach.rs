use async_trait::async_trait;
use coach_core::{CoachSession, HistoryFilter};

use crate::error::StorageError;

/// Append-only log of coach exchanges.
#[async_trait]
pub trait CoachSessionStore: Send + Sync {
    async fn append_coach_session(&self, session: &CoachSession) -> Result<(), StorageError>;

    /// Most recent sessions matching `filter`, newest first, at most
    /// `filter.limit` of them.
    async fn recent_coach_sessions(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<CoachSession>, StorageError>;

    /// Newest session of any interaction type.
    async fn latest_coach_session(
        &self,
        user_id: &str,
    ) -> Result<Option<CoachSession>, StorageError>;
}
