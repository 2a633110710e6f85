use async_trait::async_trait;
use coach_core::{
    OperatingSystem, OperatingSystemInput, PatternInput, ProcrastinationPattern, WeeklyPlan,
    WeeklyPlanInput,
};

use crate::error::StorageError;

/// Weekly plans, unique per (user, week).
#[async_trait]
pub trait WeeklyPlanStore: Send + Sync {
    /// Create or fully replace the plan for `input.week_number`.
    async fn upsert_weekly_plan(
        &self,
        user_id: &str,
        input: &WeeklyPlanInput,
    ) -> Result<WeeklyPlan, StorageError>;

    async fn get_weekly_plan(
        &self,
        user_id: &str,
        week_number: u8,
    ) -> Result<Option<WeeklyPlan>, StorageError>;
}

#[async_trait]
pub trait PatternStore: Send + Sync {
    async fn create_pattern(
        &self,
        user_id: &str,
        input: &PatternInput,
    ) -> Result<ProcrastinationPattern, StorageError>;

    /// Newest first.
    async fn list_patterns(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProcrastinationPattern>, StorageError>;

    async fn count_patterns(&self, user_id: &str) -> Result<i64, StorageError>;

    /// Fetch a pattern only if it belongs to `user_id`.
    async fn get_pattern_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<ProcrastinationPattern>, StorageError>;

    /// Returns `true` if a row was deleted.
    async fn delete_pattern(&self, id: &str) -> Result<bool, StorageError>;
}

/// One operating-system document per user.
#[async_trait]
pub trait OperatingSystemStore: Send + Sync {
    async fn upsert_operating_system(
        &self,
        user_id: &str,
        input: &OperatingSystemInput,
    ) -> Result<OperatingSystem, StorageError>;

    async fn get_operating_system(
        &self,
        user_id: &str,
    ) -> Result<Option<OperatingSystem>, StorageError>;
}
