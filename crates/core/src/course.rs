//! Users and their progress through the four-week program.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_WEEK, LAST_WEEK};
use crate::error::{CoachError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role_description: Option<String>,
    pub work_context: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role_description: None,
            work_context: None,
            created_at: Utc::now(),
        }
    }
}

/// Per-user course progress. One record per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseState {
    pub user_id: String,
    pub current_week: u8,
    pub main_goal: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CourseState {
    /// Fresh state at the start of week 1 without a goal.
    #[must_use]
    pub fn start(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            current_week: FIRST_WEEK,
            main_goal: None,
            updated_at: Utc::now(),
        }
    }

    /// The goal, if set to something other than whitespace.
    #[must_use]
    pub fn resolved_goal(&self) -> Option<&str> {
        self.main_goal.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}

/// Partial update of a course state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStateUpdate {
    pub current_week: Option<u8>,
    pub main_goal: Option<String>,
}

/// Reject week numbers outside the program.
pub fn validate_week(week: u8) -> Result<u8> {
    if (FIRST_WEEK..=LAST_WEEK).contains(&week) {
        Ok(week)
    } else {
        Err(CoachError::InvalidInput(format!(
            "week number must be between {FIRST_WEEK} and {LAST_WEEK}, got {week}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_week_bounds() {
        assert!(validate_week(0).is_err());
        assert_eq!(validate_week(1).ok(), Some(1));
        assert_eq!(validate_week(4).ok(), Some(4));
        assert!(validate_week(5).is_err());
    }

    #[test]
    fn test_resolved_goal_ignores_blank() {
        let mut state = CourseState::start("u1");
        assert_eq!(state.resolved_goal(), None);
        state.main_goal = Some("   ".to_owned());
        assert_eq!(state.resolved_goal(), None);
        state.main_goal = Some(" Chránit 2 hodiny denně ".to_owned());
        assert_eq!(state.resolved_goal(), Some("Chránit 2 hodiny denně"));
    }
}
