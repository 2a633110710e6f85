//! Weekly progress score.

use chrono::{Datelike, Duration, NaiveDate};

use crate::constants::{
    SCORE_HIGH_IMPACT_BONUS, SCORE_HIGH_IMPACT_DAYS, SCORE_MAX, SCORE_POINTS_PER_ENTRY,
};
use crate::tracker::DailyEntry;

/// Monday of the ISO week containing `today`.
#[must_use]
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// Score in `0..=100` for the entries of `week_number` dated on or after `week_start`.
///
/// Five points per qualifying entry, plus a bonus once enough of them carry a
/// high-impact step.
#[must_use]
pub fn weekly_score(entries: &[DailyEntry], week_start: NaiveDate, week_number: u8) -> u8 {
    let qualifying: Vec<&DailyEntry> = entries
        .iter()
        .filter(|e| e.date >= week_start && e.week_number == week_number)
        .collect();

    let count = u32::try_from(qualifying.len()).unwrap_or(u32::MAX);
    let mut score = count.saturating_mul(SCORE_POINTS_PER_ENTRY);

    let meaningful_days = qualifying.iter().filter(|e| e.fields.has_high_impact_step()).count();
    if meaningful_days >= SCORE_HIGH_IMPACT_DAYS {
        score = score.saturating_add(SCORE_HIGH_IMPACT_BONUS);
    }

    u8::try_from(score.min(SCORE_MAX)).unwrap_or(u8::MAX)
}
