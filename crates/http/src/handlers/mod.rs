#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod badges;
pub mod coach;
pub mod course;
pub mod dashboard;
pub mod operating_system;
pub mod patterns;
pub mod tracker;
pub mod weekly_plan;

use chrono::{NaiveDate, Utc};

/// Calendar date the server considers "today".
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
