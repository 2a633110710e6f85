use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, OperatingSystem, OperatingSystemInput};
use coach_storage::StorageBackend;
use coach_storage::traits::OperatingSystemStore;

use crate::{BadgeService, ServiceError};

/// The user's working operating system, v1: the rules distilled from the course.
pub struct OperatingSystemService {
    storage: Arc<StorageBackend>,
    badges: Arc<BadgeService>,
}

impl OperatingSystemService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, badges: Arc<BadgeService>) -> Self {
        Self { storage, badges }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<OperatingSystem>, ServiceError> {
        Ok(self.storage.get_operating_system(user_id).await?)
    }

    pub async fn save(
        &self,
        user_id: &str,
        input: &OperatingSystemInput,
        now: DateTime<Utc>,
    ) -> Result<OperatingSystem, ServiceError> {
        let os = self.storage.upsert_operating_system(user_id, input).await?;
        tracing::info!(user_id, "operating system saved");
        self.badges.award(user_id, BadgeCode::OsV1Done, now).await?;
        Ok(os)
    }
}
