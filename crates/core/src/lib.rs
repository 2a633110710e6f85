//! Core types and course algorithms for coach-os
//!
//! This crate contains domain types shared across all other crates, plus the
//! pure computations (streaks, weekly score, next step, history replay) that
//! the service layer feeds with stored records.

mod badge;
mod coach;
pub mod constants;
mod course;
pub mod env_config;
mod error;
mod next_step;
mod pattern;
mod plan;
mod score;
mod streak;
mod tracker;

pub use badge::*;
pub use coach::*;
pub use constants::*;
pub use course::*;
pub use env_config::{BadgeFailurePolicy, CoachConfig, LlmSettings, env_parse_with_default};
pub use error::*;
pub use next_step::*;
pub use pattern::*;
pub use plan::*;
pub use score::*;
pub use streak::*;
pub use tracker::*;
