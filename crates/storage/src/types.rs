//! Storage types shared across modules

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Filter over a user's daily entries. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub date: Option<NaiveDate>,
    pub week_number: Option<u8>,
    /// Inclusive lower bound on `date`.
    pub since: Option<NaiveDate>,
    pub order: SortOrder,
}

impl EntryQuery {
    #[must_use]
    pub fn for_week(week_number: u8, order: SortOrder) -> Self {
        Self { week_number: Some(week_number), order, ..Self::default() }
    }

    #[must_use]
    pub fn since(since: NaiveDate) -> Self {
        Self { since: Some(since), ..Self::default() }
    }

    pub(crate) fn matches(&self, date: NaiveDate, week_number: u8) -> bool {
        self.date.is_none_or(|d| d == date)
            && self.week_number.is_none_or(|w| w == week_number)
            && self.since.is_none_or(|s| date >= s)
    }
}
