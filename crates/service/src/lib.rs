//! Service layer for coach-os
//!
//! Centralizes the course rules between the HTTP handlers and storage/llm:
//! validation, streak and badge side effects, dashboard assembly and the
//! coach exchange.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Services hold shared handles only")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod badge_service;
mod coach_service;
mod course_service;
mod dashboard_service;
pub mod error;
mod gamification_service;
mod operating_system_service;
mod pattern_service;
mod plan_service;
mod seed;
mod streak_service;
#[cfg(test)]
mod tests;
mod tracker_service;

pub use badge_service::BadgeService;
pub use coach_service::{CoachChatInput, CoachService};
pub use course_service::CourseService;
pub use dashboard_service::{Dashboard, DashboardService, Gamification, StreakSummary};
pub use error::ServiceError;
pub use gamification_service::GamificationService;
pub use operating_system_service::OperatingSystemService;
pub use pattern_service::PatternService;
pub use plan_service::PlanService;
pub use seed::{SeedReport, seed_demo};
pub use streak_service::StreakService;
pub use tracker_service::TrackerService;
