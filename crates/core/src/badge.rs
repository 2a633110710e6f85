//! Static badge catalog and per-user awards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeCode {
    GoalLocked,
    FirstWeeklyPlan,
    AntiProcrastPatterns,
    OsV1Done,
}

impl BadgeCode {
    pub const ALL: &'static [BadgeCode] =
        &[Self::GoalLocked, Self::FirstWeeklyPlan, Self::AntiProcrastPatterns, Self::OsV1Done];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::GoalLocked => "GOAL_LOCKED",
            Self::FirstWeeklyPlan => "FIRST_WEEKLY_PLAN",
            Self::AntiProcrastPatterns => "ANTI_PROCRAST_PATTERNS",
            Self::OsV1Done => "OS_V1_DONE",
        }
    }

    /// Catalog entry for this code.
    #[must_use]
    pub const fn badge(&self) -> Badge {
        match *self {
            Self::GoalLocked => Badge {
                code: *self,
                name: "Cíl nastaven",
                description: "Úspěšně jsi nastavil svůj hlavní cíl pro Fázi 1",
                icon: "🎯",
            },
            Self::FirstWeeklyPlan => Badge {
                code: *self,
                name: "První týdenní plán",
                description: "Vytvořil jsi svůj první týdenní plán",
                icon: "📋",
            },
            Self::AntiProcrastPatterns => Badge {
                code: *self,
                name: "Vzorce prokrastinace",
                description: "Identifikoval jsi 3 vzorce prokrastinace a jejich řešení",
                icon: "⚡",
            },
            Self::OsV1Done => Badge {
                code: *self,
                name: "Pracovní OS 1.0",
                description: "Dokončil jsi svůj Pracovní operační systém 1.0",
                icon: "🚀",
            },
        }
    }
}

impl fmt::Display for BadgeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeCode {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| CoachError::InvalidBadgeCode(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Badge {
    pub code: BadgeCode,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// The full catalog in display order.
#[must_use]
pub fn badge_catalog() -> Vec<Badge> {
    BadgeCode::ALL.iter().map(BadgeCode::badge).collect()
}

/// A badge earned by a user. At most one per (user, code).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub user_id: String,
    pub badge_code: BadgeCode,
    pub earned_at: DateTime<Utc>,
}

/// Dashboard view of an earned badge.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub code: BadgeCode,
    pub name: &'static str,
    pub icon: &'static str,
    pub earned_at: DateTime<Utc>,
}

impl From<&UserBadge> for EarnedBadge {
    fn from(award: &UserBadge) -> Self {
        let badge = award.badge_code.badge();
        Self { code: award.badge_code, name: badge.name, icon: badge.icon, earned_at: award.earned_at }
    }
}
