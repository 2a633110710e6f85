//! Shared constants for coach-os.
//!
//! Centralizes the course parameters and scoring numbers used across crates.

/// First week of the program.
pub const FIRST_WEEK: u8 = 1;

/// Last week of the program (the course runs four weeks).
pub const LAST_WEEK: u8 = 4;

/// Lowest allowed value of a 1-5 rating field.
pub const RATING_MIN: u8 = 1;

/// Highest allowed value of a 1-5 rating field.
pub const RATING_MAX: u8 = 5;

/// Number of most recent coach sessions replayed as conversation history.
pub const HISTORY_SESSION_WINDOW: usize = 5;

/// Points per filled-in daily entry in the weekly score.
pub const SCORE_POINTS_PER_ENTRY: u32 = 5;

/// Bonus for enough days with a high-impact step.
pub const SCORE_HIGH_IMPACT_BONUS: u32 = 20;

/// Days with a high-impact step needed for the bonus.
pub const SCORE_HIGH_IMPACT_DAYS: usize = 4;

/// Upper bound of the weekly score.
pub const SCORE_MAX: u32 = 100;

/// Number of patterns a user needs for the anti-procrastination badge.
pub const PATTERNS_FOR_BADGE: i64 = 3;

/// User id used when a request carries no `x-user-id` header.
pub const DEMO_USER_ID: &str = "demo-user";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
