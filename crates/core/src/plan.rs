//! Weekly plans: tasks split into value tiers plus scheduled focus blocks.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::validate_week;
use crate::error::{CoachError, Result};

/// A time-boxed period reserved for uninterrupted high-value work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FocusBlock {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    /// Local start time, `HH:MM`.
    pub start_time: String,
    pub duration_min: u32,
}

impl FocusBlock {
    pub fn validate(&self) -> Result<()> {
        if self.day_of_week > 6 {
            return Err(CoachError::InvalidInput(format!(
                "dayOfWeek must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }
        if NaiveTime::parse_from_str(&self.start_time, "%H:%M").is_err() {
            return Err(CoachError::InvalidInput(format!(
                "startTime must be HH:MM, got {}",
                self.start_time
            )));
        }
        if self.duration_min == 0 {
            return Err(CoachError::InvalidInput("durationMin must be positive".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub id: String,
    pub user_id: String,
    pub week_number: u8,
    pub high_value_tasks: Vec<String>,
    pub admin_tasks: Vec<String>,
    pub low_value_tasks: Vec<String>,
    pub focus_blocks: Vec<FocusBlock>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanInput {
    pub week_number: u8,
    #[serde(default)]
    pub high_value_tasks: Vec<String>,
    #[serde(default)]
    pub admin_tasks: Vec<String>,
    #[serde(default)]
    pub low_value_tasks: Vec<String>,
    #[serde(default)]
    pub focus_blocks: Vec<FocusBlock>,
    pub notes: Option<String>,
}

impl WeeklyPlanInput {
    pub fn validate(&self) -> Result<()> {
        validate_week(self.week_number)?;
        self.focus_blocks.iter().try_for_each(FocusBlock::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(day: u8, start: &str, minutes: u32) -> FocusBlock {
        FocusBlock { day_of_week: day, start_time: start.to_owned(), duration_min: minutes }
    }

    #[test]
    fn test_focus_block_validation() {
        assert!(block(1, "09:00", 120).validate().is_ok());
        assert!(block(7, "09:00", 120).validate().is_err());
        assert!(block(1, "9am", 120).validate().is_err());
        assert!(block(1, "25:00", 120).validate().is_err());
        assert!(block(1, "14:00", 0).validate().is_err());
    }

    #[test]
    fn test_plan_input_defaults_missing_lists() {
        let input: WeeklyPlanInput = serde_json::from_str(r#"{"weekNumber":2}"#).unwrap();
        assert!(input.high_value_tasks.is_empty());
        assert!(input.focus_blocks.is_empty());
        assert!(input.validate().is_ok());
    }
}
