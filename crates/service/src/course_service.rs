use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{BadgeCode, CourseState, CourseStateUpdate, User, validate_week};
use coach_storage::StorageBackend;
use coach_storage::traits::{CourseStore, UserStore};

use crate::{BadgeService, ServiceError};

pub struct CourseService {
    storage: Arc<StorageBackend>,
    badges: Arc<BadgeService>,
}

impl CourseService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, badges: Arc<BadgeService>) -> Self {
        Self { storage, badges }
    }

    pub async fn require_user(&self, user_id: &str) -> Result<User, ServiceError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(user_id))
    }

    pub async fn get_state(&self, user_id: &str) -> Result<Option<CourseState>, ServiceError> {
        Ok(self.storage.get_course_state(user_id).await?)
    }

    /// Apply a partial update, creating the course record at week 1 if the
    /// user has none yet. A blank goal clears it; a non-blank one locks it in
    /// and awards `GOAL_LOCKED`.
    pub async fn update(
        &self,
        user_id: &str,
        update: &CourseStateUpdate,
        now: DateTime<Utc>,
    ) -> Result<CourseState, ServiceError> {
        self.require_user(user_id).await?;
        if let Some(week) = update.current_week {
            validate_week(week)?;
        }

        let mut state = self
            .storage
            .get_course_state(user_id)
            .await?
            .unwrap_or_else(|| CourseState::start(user_id));
        if let Some(week) = update.current_week {
            state.current_week = week;
        }
        if let Some(goal) = update.main_goal.as_deref() {
            let goal = goal.trim();
            state.main_goal = (!goal.is_empty()).then(|| goal.to_owned());
        }
        state.updated_at = now;
        self.storage.save_course_state(&state).await?;
        tracing::info!(user_id, week = state.current_week, "course state saved");

        if state.resolved_goal().is_some() && update.main_goal.is_some() {
            self.badges.award(user_id, BadgeCode::GoalLocked, now).await?;
        }
        Ok(state)
    }
}
