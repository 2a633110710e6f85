//! HTTP API server for coach-os.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod api_types;
mod extract;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use coach_core::BadgeFailurePolicy;
use coach_llm::LlmClient;
use coach_service::{
    BadgeService, CoachService, CourseService, DashboardService, GamificationService,
    OperatingSystemService, PatternService, PlanService, StreakService, TrackerService,
};
use coach_storage::StorageBackend;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use api_types::ApiResponse;
pub use extract::{USER_ID_HEADER, UserId};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub course_service: Arc<CourseService>,
    pub tracker_service: Arc<TrackerService>,
    pub plan_service: Arc<PlanService>,
    pub pattern_service: Arc<PatternService>,
    pub operating_system_service: Arc<OperatingSystemService>,
    pub badge_service: Arc<BadgeService>,
    pub dashboard_service: Arc<DashboardService>,
    /// Chat fails with 503 when no LLM client is configured; history still works.
    pub coach_service: Arc<CoachService>,
}

impl AppState {
    /// Wire every service over one storage backend.
    #[must_use]
    pub fn new(
        storage: Arc<StorageBackend>,
        llm: Option<Arc<LlmClient>>,
        badge_policy: BadgeFailurePolicy,
    ) -> Self {
        let badges = Arc::new(BadgeService::new(Arc::clone(&storage), badge_policy));
        let streaks = Arc::new(StreakService::new(Arc::clone(&storage)));
        let gamification = Arc::new(GamificationService::new(Arc::clone(&storage)));
        Self {
            course_service: Arc::new(CourseService::new(Arc::clone(&storage), Arc::clone(&badges))),
            tracker_service: Arc::new(TrackerService::new(Arc::clone(&storage), streaks)),
            plan_service: Arc::new(PlanService::new(Arc::clone(&storage), Arc::clone(&badges))),
            pattern_service: Arc::new(PatternService::new(Arc::clone(&storage), Arc::clone(&badges))),
            operating_system_service: Arc::new(OperatingSystemService::new(
                Arc::clone(&storage),
                Arc::clone(&badges),
            )),
            dashboard_service: Arc::new(DashboardService::new(Arc::clone(&storage), gamification)),
            coach_service: Arc::new(CoachService::new(storage, llm)),
            badge_service: badges,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/api/course-state",
            get(handlers::course::get_course_state).put(handlers::course::update_course_state),
        )
        .route(
            "/api/daily-tracker",
            get(handlers::tracker::list_entries).post(handlers::tracker::save_entry),
        )
        .route(
            "/api/weekly-plan",
            get(handlers::weekly_plan::get_plan).post(handlers::weekly_plan::save_plan),
        )
        .route(
            "/api/procrastination-patterns",
            get(handlers::patterns::list_patterns)
                .post(handlers::patterns::create_pattern)
                .delete(handlers::patterns::delete_pattern),
        )
        .route(
            "/api/operating-system",
            get(handlers::operating_system::get_operating_system)
                .post(handlers::operating_system::save_operating_system),
        )
        .route("/api/coach/chat", get(handlers::coach::history).post(handlers::coach::chat))
        .route("/api/badges", get(handlers::badges::list_badges))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
