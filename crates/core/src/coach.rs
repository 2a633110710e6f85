//! Coach conversations: interaction modes, stored sessions and history replay.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::HISTORY_SESSION_WINDOW;
use crate::error::{CoachError, Result};

/// Conversation context selecting the coach's instruction template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    Onboarding,
    WeeklyPlanning,
    Procrastination,
    Reflection,
    AdHoc,
}

impl InteractionMode {
    pub const ALL: &'static [InteractionMode] = &[
        Self::Onboarding,
        Self::WeeklyPlanning,
        Self::Procrastination,
        Self::Reflection,
        Self::AdHoc,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Onboarding => "onboarding",
            Self::WeeklyPlanning => "weekly_planning",
            Self::Procrastination => "procrastination",
            Self::Reflection => "reflection",
            Self::AdHoc => "ad_hoc",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| CoachError::InvalidInteractionType(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl FromStr for MessageRole {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(CoachError::InvalidMessageRole(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl CoachMessage {
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { role, content: content.into(), timestamp }
    }
}

/// One stored coaching exchange. Sessions are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoachSession {
    pub id: String,
    pub user_id: String,
    pub interaction_type: InteractionMode,
    pub week_number: u8,
    pub messages: Vec<CoachMessage>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Selects which sessions feed a conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    pub user_id: String,
    pub interaction_type: InteractionMode,
    pub week_number: Option<u8>,
    pub limit: usize,
}

impl HistoryFilter {
    #[must_use]
    pub fn new(user_id: impl Into<String>, mode: InteractionMode, week: Option<u8>) -> Self {
        Self {
            user_id: user_id.into(),
            interaction_type: mode,
            week_number: week,
            limit: HISTORY_SESSION_WINDOW,
        }
    }

    #[must_use]
    pub fn matches(&self, session: &CoachSession) -> bool {
        session.user_id == self.user_id
            && session.interaction_type == self.interaction_type
            && self.week_number.is_none_or(|w| session.week_number == w)
    }
}

/// Button offered next to a coach reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedAction {
    pub label: String,
    pub action: String,
}

/// Flatten sessions (given newest first) into one oldest-first message log.
#[must_use]
pub fn assemble_history(sessions_newest_first: Vec<CoachSession>) -> Vec<CoachMessage> {
    sessions_newest_first
        .into_iter()
        .rev()
        .flat_map(|session| session.messages)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(index: i64, base: DateTime<Utc>) -> CoachSession {
        let created_at = base + Duration::minutes(index * 10);
        CoachSession {
            id: format!("s{index}"),
            user_id: "u1".to_owned(),
            interaction_type: InteractionMode::Reflection,
            week_number: 2,
            messages: vec![
                CoachMessage::new(MessageRole::User, format!("q{index}"), created_at),
                CoachMessage::new(
                    MessageRole::Assistant,
                    format!("a{index}"),
                    created_at + Duration::seconds(5),
                ),
            ],
            summary: None,
            created_at,
        }
    }

    #[test]
    fn test_assemble_history_orders_oldest_first() {
        let base = Utc::now();
        let newest_first = vec![session(2, base), session(1, base), session(0, base)];
        let contents: Vec<_> =
            assemble_history(newest_first).into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["q0", "a0", "q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn test_assemble_history_empty() {
        assert!(assemble_history(Vec::new()).is_empty());
    }

    #[test]
    fn test_history_filter_week_optional() {
        let base = Utc::now();
        let s = session(0, base);
        assert!(HistoryFilter::new("u1", InteractionMode::Reflection, None).matches(&s));
        assert!(HistoryFilter::new("u1", InteractionMode::Reflection, Some(2)).matches(&s));
        assert!(!HistoryFilter::new("u1", InteractionMode::Reflection, Some(3)).matches(&s));
        assert!(!HistoryFilter::new("u1", InteractionMode::AdHoc, None).matches(&s));
        assert!(!HistoryFilter::new("u2", InteractionMode::Reflection, None).matches(&s));
    }

    #[test]
    fn test_message_timestamp_parses_from_stored_json() {
        let msg: CoachMessage = serde_json::from_str(
            r#"{"role":"assistant","content":"Ahoj!","timestamp":"2024-03-04T09:15:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.timestamp.to_rfc3339(), "2024-03-04T09:15:00+00:00");
    }

    #[test]
    fn test_interaction_mode_parsing() {
        assert_eq!("weekly_planning".parse::<InteractionMode>().unwrap(), InteractionMode::WeeklyPlanning);
        assert_eq!(InteractionMode::AdHoc.to_string(), "ad_hoc");
        assert!("coaching".parse::<InteractionMode>().is_err());
    }
}
