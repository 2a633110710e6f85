//! Consecutive-day streaks per user and metric.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Activity a streak counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StreakMetric {
    /// Days with a high-impact step recorded.
    MeaningfulStep,
    /// Days a micro-step was used against procrastination.
    MicroStepUsed,
}

impl StreakMetric {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::MeaningfulStep => "meaningful_step",
            Self::MicroStepUsed => "micro_step_used",
        }
    }
}

impl fmt::Display for StreakMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreakMetric {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "meaningful_step" => Ok(Self::MeaningfulStep),
            "micro_step_used" => Ok(Self::MicroStepUsed),
            other => Err(CoachError::InvalidStreakMetric(other.to_owned())),
        }
    }
}

/// Invariant: `current_streak <= longest_streak`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub user_id: String,
    pub metric: StreakMetric,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_date: NaiveDate,
}

/// What a qualifying event did to a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// No previous record; a new streak of 1.
    Started,
    /// The event followed the last one by exactly one day.
    Extended,
    /// A gap of more than one day; reset to 1.
    Broken,
    /// Same day (or earlier) as the last event; nothing changed.
    Unchanged,
}

impl StreakUpdate {
    /// Whether the record must be written back.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl Streak {
    #[must_use]
    pub fn start(user_id: impl Into<String>, metric: StreakMetric, today: NaiveDate) -> Self {
        Self { user_id: user_id.into(), metric, current_streak: 1, longest_streak: 1, last_date: today }
    }

    /// Apply a qualifying event dated `today`.
    pub fn advance(&mut self, today: NaiveDate) -> StreakUpdate {
        let gap_days = today.signed_duration_since(self.last_date).num_days();
        if gap_days <= 0 {
            return StreakUpdate::Unchanged;
        }
        let update = match gap_days {
            1 => {
                self.current_streak = self.current_streak.saturating_add(1);
                StreakUpdate::Extended
            },
            _ => {
                self.current_streak = 1;
                StreakUpdate::Broken
            },
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_date = today;
        update
    }
}

/// Resolve the next state of a streak from its stored record, if any.
#[must_use]
pub fn next_streak(
    existing: Option<Streak>,
    user_id: &str,
    metric: StreakMetric,
    today: NaiveDate,
) -> (Streak, StreakUpdate) {
    match existing {
        None => (Streak::start(user_id, metric, today), StreakUpdate::Started),
        Some(mut streak) => {
            let update = streak.advance(today);
            (streak, update)
        },
    }
}
