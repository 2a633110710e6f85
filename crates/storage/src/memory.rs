//! In-process storage backend.
//!
//! Mirrors the PostgreSQL schema's uniqueness keys and user foreign keys so
//! services behave the same against either backend. Used by tests and by
//! `coach-os serve --in-memory`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use coach_core::{
    BadgeCode, CoachSession, CourseState, DailyEntry, DailyFields, HistoryFilter, OperatingSystem,
    OperatingSystemInput, PatternInput, ProcrastinationPattern, Streak, StreakMetric, User,
    UserBadge, WeeklyPlan, WeeklyPlanInput,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::{
    BadgeStore, CoachSessionStore, CourseStore, DailyEntryStore, OperatingSystemStore,
    PatternStore, StreakStore, UserStore, WeeklyPlanStore,
};
use crate::types::{EntryQuery, SortOrder};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, User>,
    course_states: HashMap<String, CourseState>,
    daily_entries: HashMap<(String, NaiveDate), DailyEntry>,
    weekly_plans: HashMap<(String, u8), WeeklyPlan>,
    /// Insertion order.
    patterns: Vec<ProcrastinationPattern>,
    operating_systems: HashMap<String, OperatingSystem>,
    streaks: HashMap<(String, StreakMetric), Streak>,
    user_badges: HashMap<(String, BadgeCode), UserBadge>,
    /// Insertion order.
    coach_sessions: Vec<CoachSession>,
}

impl Tables {
    fn require_user(&self, user_id: &str) -> Result<(), StorageError> {
        if self.users.contains_key(user_id) {
            Ok(())
        } else {
            Err(StorageError::NotFound { entity: "user", id: user_id.to_owned() })
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let duplicate_email = tables.users.values().any(|u| u.email == user.email && u.id != user.id);
        if duplicate_email {
            return Err(StorageError::Duplicate(format!("email {} already registered", user.email)));
        }
        let created_at = tables.users.get(&user.id).map_or(user.created_at, |u| u.created_at);
        tables.users.insert(user.id.clone(), User { created_at, ..user.clone() });
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}

#[async_trait]
impl CourseStore for MemoryStorage {
    async fn get_course_state(&self, user_id: &str) -> Result<Option<CourseState>, StorageError> {
        Ok(self.tables.read().await.course_states.get(user_id).cloned())
    }

    async fn save_course_state(&self, state: &CourseState) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(&state.user_id)?;
        tables.course_states.insert(state.user_id.clone(), state.clone());
        Ok(())
    }
}

#[async_trait]
impl DailyEntryStore for MemoryStorage {
    async fn upsert_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        week_number: u8,
        fields: &DailyFields,
    ) -> Result<DailyEntry, StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        let now = Utc::now();
        let entry = tables
            .daily_entries
            .entry((user_id.to_owned(), date))
            .and_modify(|existing| {
                existing.fields.overlay(fields);
                existing.updated_at = now;
            })
            .or_insert_with(|| DailyEntry {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_owned(),
                date,
                week_number,
                fields: fields.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(entry.clone())
    }

    async fn get_daily_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyEntry>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.daily_entries.get(&(user_id.to_owned(), date)).cloned())
    }

    async fn list_daily_entries(
        &self,
        user_id: &str,
        query: &EntryQuery,
    ) -> Result<Vec<DailyEntry>, StorageError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<DailyEntry> = tables
            .daily_entries
            .values()
            .filter(|e| e.user_id == user_id && query.matches(e.date, e.week_number))
            .cloned()
            .collect();
        match query.order {
            SortOrder::Ascending => entries.sort_by_key(|e| e.date),
            SortOrder::Descending => entries.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        Ok(entries)
    }
}

#[async_trait]
impl WeeklyPlanStore for MemoryStorage {
    async fn upsert_weekly_plan(
        &self,
        user_id: &str,
        input: &WeeklyPlanInput,
    ) -> Result<WeeklyPlan, StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        let now = Utc::now();
        let key = (user_id.to_owned(), input.week_number);
        let (id, created_at) = tables
            .weekly_plans
            .get(&key)
            .map_or_else(|| (Uuid::new_v4().to_string(), now), |p| (p.id.clone(), p.created_at));
        let plan = WeeklyPlan {
            id,
            user_id: user_id.to_owned(),
            week_number: input.week_number,
            high_value_tasks: input.high_value_tasks.clone(),
            admin_tasks: input.admin_tasks.clone(),
            low_value_tasks: input.low_value_tasks.clone(),
            focus_blocks: input.focus_blocks.clone(),
            notes: input.notes.clone(),
            created_at,
            updated_at: now,
        };
        tables.weekly_plans.insert(key, plan.clone());
        Ok(plan)
    }

    async fn get_weekly_plan(
        &self,
        user_id: &str,
        week_number: u8,
    ) -> Result<Option<WeeklyPlan>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.weekly_plans.get(&(user_id.to_owned(), week_number)).cloned())
    }
}

#[async_trait]
impl PatternStore for MemoryStorage {
    async fn create_pattern(
        &self,
        user_id: &str,
        input: &PatternInput,
    ) -> Result<ProcrastinationPattern, StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        let pattern = ProcrastinationPattern {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            description: input.description.clone(),
            pattern_type: input.pattern_type.clone(),
            micro_step: input.micro_step.clone(),
            trigger_phrases: input.trigger_phrases.clone(),
            created_at: Utc::now(),
        };
        tables.patterns.push(pattern.clone());
        Ok(pattern)
    }

    async fn list_patterns(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProcrastinationPattern>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.patterns.iter().rev().filter(|p| p.user_id == user_id).cloned().collect())
    }

    async fn count_patterns(&self, user_id: &str) -> Result<i64, StorageError> {
        let tables = self.tables.read().await;
        let count = tables.patterns.iter().filter(|p| p.user_id == user_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn get_pattern_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<ProcrastinationPattern>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.patterns.iter().find(|p| p.id == id && p.user_id == user_id).cloned())
    }

    async fn delete_pattern(&self, id: &str) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        let before = tables.patterns.len();
        tables.patterns.retain(|p| p.id != id);
        Ok(tables.patterns.len() < before)
    }
}

#[async_trait]
impl OperatingSystemStore for MemoryStorage {
    async fn upsert_operating_system(
        &self,
        user_id: &str,
        input: &OperatingSystemInput,
    ) -> Result<OperatingSystem, StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        let os = OperatingSystem {
            user_id: user_id.to_owned(),
            planning_rules: input.planning_rules.clone(),
            anti_procrastination_rules: input.anti_procrastination_rules.clone(),
            visible_changes: input.visible_changes.clone(),
            ai_summary: input.ai_summary.clone(),
            updated_at: Utc::now(),
        };
        tables.operating_systems.insert(user_id.to_owned(), os.clone());
        Ok(os)
    }

    async fn get_operating_system(
        &self,
        user_id: &str,
    ) -> Result<Option<OperatingSystem>, StorageError> {
        Ok(self.tables.read().await.operating_systems.get(user_id).cloned())
    }
}

#[async_trait]
impl StreakStore for MemoryStorage {
    async fn get_streak(
        &self,
        user_id: &str,
        metric: StreakMetric,
    ) -> Result<Option<Streak>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.streaks.get(&(user_id.to_owned(), metric)).cloned())
    }

    async fn save_streak(&self, streak: &Streak) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(&streak.user_id)?;
        tables.streaks.insert((streak.user_id.clone(), streak.metric), streak.clone());
        Ok(())
    }

    async fn list_streaks(&self, user_id: &str) -> Result<Vec<Streak>, StorageError> {
        let tables = self.tables.read().await;
        let mut streaks: Vec<Streak> =
            tables.streaks.values().filter(|s| s.user_id == user_id).cloned().collect();
        streaks.sort_by_key(|s| s.metric.as_str());
        Ok(streaks)
    }
}

#[async_trait]
impl BadgeStore for MemoryStorage {
    async fn award_badge(
        &self,
        user_id: &str,
        code: BadgeCode,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(user_id)?;
        let key = (user_id.to_owned(), code);
        if tables.user_badges.contains_key(&key) {
            return Ok(false);
        }
        tables
            .user_badges
            .insert(key, UserBadge { user_id: user_id.to_owned(), badge_code: code, earned_at });
        Ok(true)
    }

    async fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>, StorageError> {
        let tables = self.tables.read().await;
        let mut badges: Vec<UserBadge> =
            tables.user_badges.values().filter(|b| b.user_id == user_id).cloned().collect();
        badges.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        Ok(badges)
    }
}

#[async_trait]
impl CoachSessionStore for MemoryStorage {
    async fn append_coach_session(&self, session: &CoachSession) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables.require_user(&session.user_id)?;
        if tables.coach_sessions.iter().any(|s| s.id == session.id) {
            return Err(StorageError::Duplicate(format!("coach session {}", session.id)));
        }
        tables.coach_sessions.push(session.clone());
        Ok(())
    }

    async fn recent_coach_sessions(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<CoachSession>, StorageError> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<CoachSession> =
            tables.coach_sessions.iter().rev().filter(|s| filter.matches(s)).cloned().collect();
        // Stable: equal timestamps keep the later insert first.
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(filter.limit);
        Ok(sessions)
    }

    async fn latest_coach_session(
        &self,
        user_id: &str,
    ) -> Result<Option<CoachSession>, StorageError> {
        let tables = self.tables.read().await;
        let latest = tables
            .coach_sessions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .reduce(|newest, s| if s.created_at > newest.created_at { s } else { newest });
        Ok(latest.cloned())
    }
}
