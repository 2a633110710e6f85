//! Storage backend trait abstraction
//!
//! Defines async domain traits for storage operations. PostgreSQL and the
//! in-memory backend both implement every trait; services depend on the
//! traits through [`crate::StorageBackend`].

pub mod badge;
pub mod coach;
pub mod course;
pub mod plan;
pub mod tracker;

pub use badge::BadgeStore;
pub use coach::CoachSessionStore;
pub use course::{CourseStore, UserStore};
pub use plan::{OperatingSystemStore, PatternStore, WeeklyPlanStore};
pub use tracker::{DailyEntryStore, StreakStore};
