use std::sync::Arc;

use chrono::{DateTime, Utc};
use coach_core::{
    CoachMessage, CoachSession, FIRST_WEEK, HistoryFilter, InteractionMode, MessageRole,
    assemble_history, validate_week,
};
use coach_llm::{CoachContext, CoachReply, LlmClient};
use coach_storage::traits::{
    CoachSessionStore, CourseStore, DailyEntryStore, PatternStore, UserStore, WeeklyPlanStore,
};
use coach_storage::{EntryQuery, SortOrder, StorageBackend};
use serde::Deserialize;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachChatInput {
    pub message: String,
    pub interaction_type: InteractionMode,
    pub week_number: Option<u8>,
}

/// Coach conversations: context gathering, the LLM exchange and the session log.
pub struct CoachService {
    storage: Arc<StorageBackend>,
    llm: Option<Arc<LlmClient>>,
}

impl CoachService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, llm: Option<Arc<LlmClient>>) -> Self {
        Self { storage, llm }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Messages of the most recent sessions for this mode (and week, when
    /// given), oldest first.
    pub async fn history(
        &self,
        user_id: &str,
        mode: InteractionMode,
        week_number: Option<u8>,
    ) -> Result<Vec<CoachMessage>, ServiceError> {
        let filter = HistoryFilter::new(user_id, mode, week_number);
        let sessions = self.storage.recent_coach_sessions(&filter).await?;
        Ok(assemble_history(sessions))
    }

    pub async fn chat(
        &self,
        user_id: &str,
        input: &CoachChatInput,
        now: DateTime<Utc>,
    ) -> Result<CoachReply, ServiceError> {
        if input.message.trim().is_empty() {
            return Err(ServiceError::InvalidInput("message must not be empty".to_owned()));
        }
        if let Some(week) = input.week_number {
            validate_week(week)?;
        }

        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(user_id))?;
        let course = self.storage.get_course_state(user_id).await?;
        let mode = input.interaction_type;
        let week = input
            .week_number
            .or_else(|| course.as_ref().map(|c| c.current_week))
            .unwrap_or(FIRST_WEEK);

        let mut ctx = CoachContext::new(user.name, week, mode);
        ctx.role_description = user.role_description;
        ctx.work_context = user.work_context;
        ctx.main_goal = course.as_ref().and_then(|c| c.resolved_goal()).map(str::to_owned);
        match mode {
            InteractionMode::WeeklyPlanning => {
                ctx.weekly_plan = self.storage.get_weekly_plan(user_id, week).await?;
            },
            InteractionMode::Reflection => {
                let query = EntryQuery::for_week(week, SortOrder::Ascending);
                ctx.daily_entries = self.storage.list_daily_entries(user_id, &query).await?;
            },
            InteractionMode::Procrastination => {
                ctx.patterns = self.storage.list_patterns(user_id).await?;
            },
            InteractionMode::Onboarding | InteractionMode::AdHoc => {},
        }

        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| ServiceError::NotConfigured("OPENAI_API_KEY is not set".to_owned()))?;
        let history = self.history(user_id, mode, Some(week)).await?;
        let reply = llm.coach_chat(&ctx, &input.message, &history).await?;

        let session = CoachSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            interaction_type: mode,
            week_number: week,
            messages: vec![
                CoachMessage::new(MessageRole::User, input.message.clone(), now),
                CoachMessage::new(MessageRole::Assistant, reply.reply.clone(), now),
            ],
            summary: None,
            created_at: now,
        };
        self.storage.append_coach_session(&session).await?;
        tracing::info!(
            user_id,
            mode = %mode,
            week,
            history_len = history.len(),
            actions = reply.suggested_actions.len(),
            "coach exchange stored"
        );
        Ok(reply)
    }
}
