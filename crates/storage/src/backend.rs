//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use coach_core::{
    BadgeCode, CoachSession, CourseState, DailyEntry, DailyFields, HistoryFilter, OperatingSystem,
    OperatingSystemInput, PatternInput, ProcrastinationPattern, Streak, StreakMetric, User,
    UserBadge, WeeklyPlan, WeeklyPlanInput,
};

use crate::error::StorageError;
use crate::traits::{
    BadgeStore, CoachSessionStore, CourseStore, DailyEntryStore, OperatingSystemStore,
    PatternStore, StreakStore, UserStore, WeeklyPlanStore,
};
use crate::types::EntryQuery;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <crate::memory::MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(crate::pg_storage::PgStorage),
    Memory(crate::memory::MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(crate::memory::MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── UserStore / CourseStore ──────────────────────────────────────

#[async_trait]
impl UserStore for StorageBackend {
    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        dispatch!(self, UserStore, save_user(user))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        dispatch!(self, UserStore, get_user(id))
    }
}

#[async_trait]
impl CourseStore for StorageBackend {
    async fn get_course_state(&self, user_id: &str) -> Result<Option<CourseState>, StorageError> {
        dispatch!(self, CourseStore, get_course_state(user_id))
    }

    async fn save_course_state(&self, state: &CourseState) -> Result<(), StorageError> {
        dispatch!(self, CourseStore, save_course_state(state))
    }
}

// ── DailyEntryStore / StreakStore ────────────────────────────────

#[async_trait]
impl DailyEntryStore for StorageBackend {
    async fn upsert_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        week_number: u8,
        fields: &DailyFields,
    ) -> Result<DailyEntry, StorageError> {
        dispatch!(self, DailyEntryStore, upsert_daily_entry(user_id, date, week_number, fields))
    }

    async fn get_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyEntry>, StorageError> {
        dispatch!(self, DailyEntryStore, get_daily_entry(user_id, date))
    }

    async fn list_daily_entries(
        &self,
        user_id: &str,
        query: &EntryQuery,
    ) -> Result<Vec<DailyEntry>, StorageError> {
        dispatch!(self, DailyEntryStore, list_daily_entries(user_id, query))
    }
}

#[async_trait]
impl StreakStore for StorageBackend {
    async fn get_streak(
        &self,
        user_id: &str,
        metric: StreakMetric,
    ) -> Result<Option<Streak>, StorageError> {
        dispatch!(self, StreakStore, get_streak(user_id, metric))
    }

    async fn save_streak(&self, streak: &Streak) -> Result<(), StorageError> {
        dispatch!(self, StreakStore, save_streak(streak))
    }

    async fn list_streaks(&self, user_id: &str) -> Result<Vec<Streak>, StorageError> {
        dispatch!(self, StreakStore, list_streaks(user_id))
    }
}

// ── WeeklyPlanStore / PatternStore / OperatingSystemStore ────────

#[async_trait]
impl WeeklyPlanStore for StorageBackend {
    async fn upsert_weekly_plan(
        &self,
        user_id: &str,
        input: &WeeklyPlanInput,
    ) -> Result<WeeklyPlan, StorageError> {
        dispatch!(self, WeeklyPlanStore, upsert_weekly_plan(user_id, input))
    }

    async fn get_weekly_plan(
        &self,
        user_id: &str,
        week_number: u8,
    ) -> Result<Option<WeeklyPlan>, StorageError> {
        dispatch!(self, WeeklyPlanStore, get_weekly_plan(user_id, week_number))
    }
}

#[async_trait]
impl PatternStore for StorageBackend {
    async fn create_pattern(
        &self,
        user_id: &str,
        input: &PatternInput,
    ) -> Result<ProcrastinationPattern, StorageError> {
        dispatch!(self, PatternStore, create_pattern(user_id, input))
    }

    async fn list_patterns(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProcrastinationPattern>, StorageError> {
        dispatch!(self, PatternStore, list_patterns(user_id))
    }

    async fn count_patterns(&self, user_id: &str) -> Result<i64, StorageError> {
        dispatch!(self, PatternStore, count_patterns(user_id))
    }

    async fn get_pattern_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<ProcrastinationPattern>, StorageError> {
        dispatch!(self, PatternStore, get_pattern_for_user(id, user_id))
    }

    async fn delete_pattern(&self, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, PatternStore, delete_pattern(id))
    }
}

#[async_trait]
impl OperatingSystemStore for StorageBackend {
    async fn upsert_operating_system(
        &self,
        user_id: &str,
        input: &OperatingSystemInput,
    ) -> Result<OperatingSystem, StorageError> {
        dispatch!(self, OperatingSystemStore, upsert_operating_system(user_id, input))
    }

    async fn get_operating_system(
        &self,
        user_id: &str,
    ) -> Result<Option<OperatingSystem>, StorageError> {
        dispatch!(self, OperatingSystemStore, get_operating_system(user_id))
    }
}

// ── BadgeStore / CoachSessionStore ───────────────────────────────

#[async_trait]
impl BadgeStore for StorageBackend {
    async fn award_badge(
        &self,
        user_id: &str,
        code: BadgeCode,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        dispatch!(self, BadgeStore, award_badge(user_id, code, earned_at))
    }

    async fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>, StorageError> {
        dispatch!(self, BadgeStore, list_user_badges(user_id))
    }
}

#[async_trait]
impl CoachSessionStore for StorageBackend {
    async fn append_coach_session(&self, session: &CoachSession) -> Result<(), StorageError> {
        dispatch!(self, CoachSessionStore, append_coach_session(session))
    }

    async fn recent_coach_sessions(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<CoachSession>, StorageError> {
        dispatch!(self, CoachSessionStore, recent_coach_sessions(filter))
    }

    async fn latest_coach_session(
        &self,
        user_id: &str,
    ) -> Result<Option<CoachSession>, StorageError> {
        dispatch!(self, CoachSessionStore, latest_coach_session(user_id))
    }
}
