use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use coach_core::{
    BadgeCode, CourseState, DailyFields, NextStep, WeeklyPlanInput,
};
use coach_storage::StorageBackend;
use coach_storage::traits::{CourseStore, DailyEntryStore, WeeklyPlanStore};

use super::{day, storage_with_users};
use crate::{DashboardService, GamificationService, seed_demo};

fn dashboard(storage: &Arc<StorageBackend>) -> DashboardService {
    DashboardService::new(Arc::clone(storage), Arc::new(GamificationService::new(Arc::clone(storage))))
}

fn high_impact() -> DailyFields {
    DailyFields { high_impact_step: Some("Dokončil jsem návrh".to_owned()), ..DailyFields::default() }
}

#[tokio::test]
async fn test_weekly_score_counts_current_iso_week_only() {
    let storage = storage_with_users(&["u1"]).await;
    let monday = day(2024, 3, 4);
    for offset in 0..4 {
        storage
            .upsert_daily_entry("u1", monday + Duration::days(offset), 2, &high_impact())
            .await
            .unwrap();
    }
    storage.upsert_daily_entry("u1", monday - Duration::days(1), 2, &high_impact()).await.unwrap();

    let gamification = GamificationService::new(Arc::clone(&storage));
    let thursday = day(2024, 3, 7);
    assert_eq!(gamification.weekly_score("u1", 2, thursday).await.unwrap(), 40);
    assert_eq!(gamification.weekly_score("u1", 3, thursday).await.unwrap(), 0);
    // The following Monday starts a fresh window.
    assert_eq!(gamification.weekly_score("u1", 2, day(2024, 3, 11)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_dashboard_for_unknown_user_is_not_found() {
    let storage = storage_with_users(&[]).await;
    let err = dashboard(&storage).dashboard("ghost", day(2024, 3, 4)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_fresh_user_starts_onboarding() {
    let storage = storage_with_users(&["u1"]).await;
    let view = dashboard(&storage).dashboard("u1", day(2024, 3, 4)).await.unwrap();
    assert_eq!(view.next_step, NextStep::BeginOnboarding);
    assert_eq!(view.current_week, 1);
    assert_eq!(view.gamification.weekly_score, 0);
    assert!(view.course_state.is_none());
    assert!(view.coach_summary.is_none());
}

#[tokio::test]
async fn test_next_step_progression() {
    let storage = storage_with_users(&["u1"]).await;
    let service = dashboard(&storage);
    let today = day(2024, 3, 12);

    let mut state = CourseState::start("u1");
    state.current_week = 2;
    storage.save_course_state(&state).await.unwrap();
    assert_eq!(service.dashboard("u1", today).await.unwrap().next_step, NextStep::SetMainGoal);

    state.main_goal = Some("Méně hasit požáry".to_owned());
    storage.save_course_state(&state).await.unwrap();
    assert_eq!(
        service.dashboard("u1", today).await.unwrap().next_step,
        NextStep::CreateWeeklyPlan(2)
    );

    let plan: WeeklyPlanInput = serde_json::from_str(r#"{"weekNumber":2}"#).unwrap();
    storage.upsert_weekly_plan("u1", &plan).await.unwrap();
    assert_eq!(service.dashboard("u1", today).await.unwrap().next_step, NextStep::FillTodayTracker);

    storage.upsert_daily_entry("u1", today, 2, &high_impact()).await.unwrap();
    let view = service.dashboard("u1", today).await.unwrap();
    assert_eq!(view.next_step, NextStep::ContinueWeek(2));
    assert_eq!(view.current_week, 2);
    assert!(view.today_entry.is_some());
    assert_eq!(view.gamification.weekly_score, 5);
}

#[tokio::test]
async fn test_seeded_demo_dashboard() {
    let storage = Arc::new(StorageBackend::new_memory());
    let today = day(2024, 3, 5);
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();

    let first = seed_demo(&storage, today, now).await.unwrap();
    assert!(first.user && first.course_state && first.weekly_plan && first.daily_entry);
    assert_eq!(first.patterns, 3);
    assert_eq!(first.badges, 1);
    assert!(first.coach_session);

    let second = seed_demo(&storage, today, now).await.unwrap();
    assert_eq!(second, crate::SeedReport::default());

    let view = dashboard(&storage).dashboard("demo-user", today).await.unwrap();
    assert_eq!(view.user.name, "Demo Uživatel");
    assert_eq!(view.next_step, NextStep::SetMainGoal);
    assert_eq!(view.coach_summary.as_deref(), Some("Zahájení onboarding rozhovoru"));
    assert_eq!(view.gamification.badges.len(), 1);
    assert_eq!(view.gamification.badges[0].code, BadgeCode::GoalLocked);
    assert!(view.today_entry.is_none());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["nextStep"], "Dokonči diagnostický rozhovor a nastav svůj hlavní cíl");
    assert_eq!(json["gamification"]["badges"][0]["icon"], "🎯");
    assert_eq!(json["currentWeek"], 1);
}
