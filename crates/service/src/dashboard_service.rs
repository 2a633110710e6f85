use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{
    CourseState, DailyEntry, EarnedBadge, FIRST_WEEK, NextStep, NextStepInputs, Streak,
    StreakMetric, User, advise_next_step,
};
use coach_storage::StorageBackend;
use coach_storage::traits::{
    BadgeStore, CoachSessionStore, CourseStore, DailyEntryStore, StreakStore, UserStore,
    WeeklyPlanStore,
};
use serde::Serialize;

use crate::{GamificationService, ServiceError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub metric: StreakMetric,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl From<&Streak> for StreakSummary {
    fn from(streak: &Streak) -> Self {
        Self {
            metric: streak.metric,
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gamification {
    pub weekly_score: u8,
    pub badges: Vec<EarnedBadge>,
    pub streaks: Vec<StreakSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: User,
    pub course_state: Option<CourseState>,
    pub current_week: u8,
    pub next_step: NextStep,
    pub today_entry: Option<DailyEntry>,
    pub gamification: Gamification,
    pub coach_summary: Option<String>,
}

/// Read-only overview assembled fresh from storage on every call.
pub struct DashboardService {
    storage: Arc<StorageBackend>,
    gamification: Arc<GamificationService>,
}

impl DashboardService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, gamification: Arc<GamificationService>) -> Self {
        Self { storage, gamification }
    }

    /// The advisor's lookups: course state, this week's plan, today's entry.
    pub async fn next_step(
        &self,
        user_id: &str,
        course: Option<CourseState>,
        today: NaiveDate,
    ) -> Result<NextStep, ServiceError> {
        let has_weekly_plan = match course.as_ref() {
            Some(c) => self.storage.get_weekly_plan(user_id, c.current_week).await?.is_some(),
            None => false,
        };
        let has_today_entry = self.storage.get_daily_entry(user_id, today).await?.is_some();
        Ok(advise_next_step(&NextStepInputs { course, has_weekly_plan, has_today_entry }))
    }

    pub async fn dashboard(&self, user_id: &str, today: NaiveDate) -> Result<Dashboard, ServiceError> {
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(user_id))?;
        let course_state = self.storage.get_course_state(user_id).await?;
        let current_week = course_state.as_ref().map_or(FIRST_WEEK, |c| c.current_week);

        let today_entry = self.storage.get_daily_entry(user_id, today).await?;
        let badges = self.storage.list_user_badges(user_id).await?;
        let streaks = self.storage.list_streaks(user_id).await?;
        let weekly_score = self.gamification.weekly_score(user_id, current_week, today).await?;
        let next_step = self.next_step(user_id, course_state.clone(), today).await?;
        let coach_summary = self
            .storage
            .latest_coach_session(user_id)
            .await?
            .and_then(|s| s.summary)
            .filter(|s| !s.is_empty());

        tracing::debug!(user_id, week = current_week, next_step = next_step.code(), "dashboard built");
        Ok(Dashboard {
            user,
            course_state,
            current_week,
            next_step,
            today_entry,
            gamification: Gamification {
                weekly_score,
                badges: badges.iter().map(EarnedBadge::from).collect(),
                streaks: streaks.iter().map(StreakSummary::from).collect(),
            },
            coach_summary,
        })
    }
}
