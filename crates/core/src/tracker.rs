//! Daily tracker entries.
//!
//! One entry per user and calendar date. Which fields are filled depends on
//! the course week: week 1 tracks engagement, week 2 focus blocks and
//! high-impact steps, week 3 procrastination, week 4 system alignment.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{RATING_MAX, RATING_MIN};
use crate::course::validate_week;
use crate::error::{CoachError, Result};

/// Whether the planned focus block happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FocusBlockStatus {
    Yes,
    No,
    Partial,
}

impl FocusBlockStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for FocusBlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusBlockStatus {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            "PARTIAL" => Ok(Self::Partial),
            other => Err(CoachError::InvalidFocusBlockStatus(other.to_owned())),
        }
    }
}

/// Week-dependent fields shared by stored entries and incoming input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyFields {
    // Week 1
    pub engaged_today: Option<bool>,
    pub day_feeling: Option<u8>,
    pub frustration_note: Option<String>,
    // Week 2
    pub focus_block_done: Option<FocusBlockStatus>,
    pub high_impact_step: Option<String>,
    pub disruption_reason: Option<String>,
    // Week 3
    pub procrastination_event: Option<bool>,
    pub micro_step_used: Option<bool>,
    pub micro_step_context: Option<String>,
    // Week 4
    pub system_alignment: Option<u8>,
    pub positive_event: Option<String>,
}

impl DailyFields {
    /// Any non-empty step counts, whitespace included.
    #[must_use]
    pub fn has_high_impact_step(&self) -> bool {
        self.high_impact_step.as_deref().is_some_and(|s| !s.is_empty())
    }

    #[must_use]
    pub fn used_micro_step(&self) -> bool {
        self.micro_step_used == Some(true)
    }

    /// Copy every field that is set in `update`; unset fields keep their
    /// current value.
    pub fn overlay(&mut self, update: &DailyFields) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.engaged_today, &update.engaged_today);
        take(&mut self.day_feeling, &update.day_feeling);
        take(&mut self.frustration_note, &update.frustration_note);
        take(&mut self.focus_block_done, &update.focus_block_done);
        take(&mut self.high_impact_step, &update.high_impact_step);
        take(&mut self.disruption_reason, &update.disruption_reason);
        take(&mut self.procrastination_event, &update.procrastination_event);
        take(&mut self.micro_step_used, &update.micro_step_used);
        take(&mut self.micro_step_context, &update.micro_step_context);
        take(&mut self.system_alignment, &update.system_alignment);
        take(&mut self.positive_event, &update.positive_event);
    }

    /// Check the 1-5 rating fields.
    pub fn validate(&self) -> Result<()> {
        check_rating("dayFeeling", self.day_feeling)?;
        check_rating("systemAlignment", self.system_alignment)
    }
}

fn check_rating(field: &str, value: Option<u8>) -> Result<()> {
    match value {
        Some(v) if !(RATING_MIN..=RATING_MAX).contains(&v) => Err(CoachError::InvalidInput(
            format!("{field} must be between {RATING_MIN} and {RATING_MAX}, got {v}"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub week_number: u8,
    #[serde(flatten)]
    pub fields: DailyFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming tracker save request. `date` is an ISO date or timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntryInput {
    pub date: String,
    pub week_number: u8,
    #[serde(flatten)]
    pub fields: DailyFields,
}

impl DailyEntryInput {
    /// Validate and resolve the calendar date the entry is keyed on.
    pub fn validated_date(&self) -> Result<NaiveDate> {
        validate_week(self.week_number)?;
        self.fields.validate()?;
        parse_calendar_date(&self.date)
    }
}

/// Normalize `2024-03-04` or an RFC 3339 timestamp to a calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| CoachError::InvalidInput(format!("invalid date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(parse_calendar_date("2024-03-04").unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-04T18:30:00+01:00").unwrap(), expected);
        assert!(parse_calendar_date("04/03/2024").is_err());
    }

    #[test]
    fn test_high_impact_step_counts_any_non_empty_value() {
        let mut fields = DailyFields::default();
        assert!(!fields.has_high_impact_step());
        fields.high_impact_step = Some(String::new());
        assert!(!fields.has_high_impact_step());
        fields.high_impact_step = Some("  ".to_owned());
        assert!(fields.has_high_impact_step());
        fields.high_impact_step = Some("Dopsal jsem strategii".to_owned());
        assert!(fields.has_high_impact_step());
    }

    #[test]
    fn test_rating_validation() {
        let fields = DailyFields { day_feeling: Some(6), ..DailyFields::default() };
        assert!(fields.validate().is_err());
        let fields = DailyFields { system_alignment: Some(0), ..DailyFields::default() };
        assert!(fields.validate().is_err());
        let fields = DailyFields { day_feeling: Some(5), ..DailyFields::default() };
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_input_deserializes_camel_case() {
        let input: DailyEntryInput = serde_json::from_str(
            r#"{"date":"2024-03-04","weekNumber":2,"highImpactStep":"Prezentace","focusBlockDone":"PARTIAL"}"#,
        )
        .unwrap();
        assert_eq!(input.week_number, 2);
        assert_eq!(input.fields.focus_block_done, Some(FocusBlockStatus::Partial));
        assert!(input.fields.has_high_impact_step());
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let mut stored = DailyFields {
            engaged_today: Some(true),
            frustration_note: Some("Příliš mnoho meetingů".to_owned()),
            ..DailyFields::default()
        };
        let update = DailyFields { day_feeling: Some(4), engaged_today: Some(false), ..DailyFields::default() };
        stored.overlay(&update);
        assert_eq!(stored.engaged_today, Some(false));
        assert_eq!(stored.day_feeling, Some(4));
        assert_eq!(stored.frustration_note.as_deref(), Some("Příliš mnoho meetingů"));
    }

    #[test]
    fn test_input_rejects_week_out_of_range() {
        let input = DailyEntryInput {
            date: "2024-03-04".to_owned(),
            week_number: 7,
            fields: DailyFields::default(),
        };
        assert!(input.validated_date().is_err());
    }
}
