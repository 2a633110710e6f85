use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, WeeklyPlan, WeeklyPlanInput, validate_week};
use coach_storage::StorageBackend;
use coach_storage::traits::WeeklyPlanStore;

use crate::{BadgeService, ServiceError};

pub struct PlanService {
    storage: Arc<StorageBackend>,
    badges: Arc<BadgeService>,
}

impl PlanService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, badges: Arc<BadgeService>) -> Self {
        Self { storage, badges }
    }

    pub async fn get_plan(
        &self,
        user_id: &str,
        week_number: u8,
    ) -> Result<Option<WeeklyPlan>, ServiceError> {
        validate_week(week_number)?;
        Ok(self.storage.get_weekly_plan(user_id, week_number).await?)
    }

    /// Upsert the plan for its week and award `FIRST_WEEKLY_PLAN`.
    pub async fn save_plan(
        &self,
        user_id: &str,
        input: &WeeklyPlanInput,
        now: DateTime<Utc>,
    ) -> Result<WeeklyPlan, ServiceError> {
        input.validate()?;
        let plan = self.storage.upsert_weekly_plan(user_id, input).await?;
        tracing::info!(
            user_id,
            week = plan.week_number,
            focus_blocks = plan.focus_blocks.len(),
            "weekly plan saved"
        );
        self.badges.award(user_id, BadgeCode::FirstWeeklyPlan, now).await?;
        Ok(plan)
    }
}
