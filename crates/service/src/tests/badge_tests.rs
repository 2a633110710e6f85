use std::sync::Arc;

use chrono::Utc;
use coach_core::{
    BadgeCode, BadgeFailurePolicy, CourseStateUpdate, OperatingSystemInput, PatternInput,
    WeeklyPlanInput,
};

use super::{badges, storage_with_users};
use crate::{
    BadgeService, CourseService, OperatingSystemService, PatternService, PlanService, ServiceError,
};

fn pattern(n: usize) -> PatternInput {
    PatternInput {
        description: format!("Odkládám úkol {n}"),
        pattern_type: "Nejasné zadání".to_owned(),
        micro_step: "Napsat první větu".to_owned(),
        trigger_phrases: vec!["report".to_owned()],
    }
}

fn plan(week: u8) -> WeeklyPlanInput {
    WeeklyPlanInput {
        week_number: week,
        high_value_tasks: vec!["Prezentace pro vedení".to_owned()],
        admin_tasks: Vec::new(),
        low_value_tasks: Vec::new(),
        focus_blocks: Vec::new(),
        notes: None,
    }
}

async fn earned_codes(service: &BadgeService, user: &str) -> Vec<BadgeCode> {
    #[allow(clippy::unwrap_used, reason = "test code")]
    service.earned(user).await.unwrap().into_iter().map(|b| b.code).collect()
}

#[tokio::test]
async fn test_first_weekly_plan_awarded_once() {
    let storage = storage_with_users(&["u1"]).await;
    let badges = badges(&storage);
    let plans = PlanService::new(Arc::clone(&storage), Arc::clone(&badges));

    plans.save_plan("u1", &plan(2), Utc::now()).await.unwrap();
    plans.save_plan("u1", &plan(3), Utc::now()).await.unwrap();

    assert_eq!(earned_codes(&badges, "u1").await, vec![BadgeCode::FirstWeeklyPlan]);
    assert!(plans.get_plan("u1", 3).await.unwrap().is_some());
    assert!(plans.get_plan("u1", 1).await.unwrap().is_none());
    assert!(matches!(plans.get_plan("u1", 9).await, Err(ServiceError::InvalidInput(_))));
}

#[tokio::test]
async fn test_pattern_badge_after_third_pattern() {
    let storage = storage_with_users(&["u1"]).await;
    let badges = badges(&storage);
    let patterns = PatternService::new(Arc::clone(&storage), Arc::clone(&badges));

    patterns.create("u1", &pattern(1), Utc::now()).await.unwrap();
    patterns.create("u1", &pattern(2), Utc::now()).await.unwrap();
    assert!(earned_codes(&badges, "u1").await.is_empty());

    patterns.create("u1", &pattern(3), Utc::now()).await.unwrap();
    assert_eq!(earned_codes(&badges, "u1").await, vec![BadgeCode::AntiProcrastPatterns]);

    patterns.create("u1", &pattern(4), Utc::now()).await.unwrap();
    assert_eq!(earned_codes(&badges, "u1").await.len(), 1);
}

#[tokio::test]
async fn test_pattern_delete_requires_owner() {
    let storage = storage_with_users(&["u1", "u2"]).await;
    let patterns = PatternService::new(Arc::clone(&storage), badges(&storage));
    let created = patterns.create("u1", &pattern(1), Utc::now()).await.unwrap();

    let err = patterns.delete("u2", &created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "pattern", .. }));
    assert_eq!(patterns.list("u1").await.unwrap().len(), 1);

    patterns.delete("u1", &created.id).await.unwrap();
    assert!(patterns.list("u1").await.unwrap().is_empty());
    assert!(patterns.delete("u1", &created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_blank_pattern_rejected() {
    let storage = storage_with_users(&["u1"]).await;
    let patterns = PatternService::new(Arc::clone(&storage), badges(&storage));
    let mut input = pattern(1);
    input.micro_step = String::new();
    assert!(matches!(
        patterns.create("u1", &input, Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_operating_system_save_awards_badge() {
    let storage = storage_with_users(&["u1"]).await;
    let badges = badges(&storage);
    let os = OperatingSystemService::new(Arc::clone(&storage), Arc::clone(&badges));
    let input = OperatingSystemInput {
        planning_rules: vec!["Každé pondělí 30 minut plánování".to_owned()],
        anti_procrastination_rules: vec!["Timer na 10 minut".to_owned()],
        visible_changes: Vec::new(),
        ai_summary: None,
    };

    let saved = os.save("u1", &input, Utc::now()).await.unwrap();
    assert_eq!(saved.planning_rules.len(), 1);
    assert_eq!(os.get("u1").await.unwrap(), Some(saved));
    assert_eq!(earned_codes(&badges, "u1").await, vec![BadgeCode::OsV1Done]);
}

#[tokio::test]
async fn test_course_update_creates_state_and_locks_goal() {
    let storage = storage_with_users(&["u1"]).await;
    let badges = badges(&storage);
    let course = CourseService::new(Arc::clone(&storage), Arc::clone(&badges));

    let blank = CourseStateUpdate { current_week: None, main_goal: Some("  ".to_owned()) };
    let state = course.update("u1", &blank, Utc::now()).await.unwrap();
    assert_eq!(state.current_week, 1);
    assert_eq!(state.main_goal, None);
    assert!(earned_codes(&badges, "u1").await.is_empty());

    let goal = CourseStateUpdate {
        current_week: Some(2),
        main_goal: Some(" Chránit 2 hodiny denně na hlubokou práci ".to_owned()),
    };
    let state = course.update("u1", &goal, Utc::now()).await.unwrap();
    assert_eq!(state.current_week, 2);
    assert_eq!(state.main_goal.as_deref(), Some("Chránit 2 hodiny denně na hlubokou práci"));
    assert_eq!(earned_codes(&badges, "u1").await, vec![BadgeCode::GoalLocked]);

    let week_only = CourseStateUpdate { current_week: Some(3), main_goal: None };
    let state = course.update("u1", &week_only, Utc::now()).await.unwrap();
    assert_eq!(state.resolved_goal(), Some("Chránit 2 hodiny denně na hlubokou práci"));
}

#[tokio::test]
async fn test_course_update_validates_week_and_user() {
    let storage = storage_with_users(&["u1"]).await;
    let course = CourseService::new(Arc::clone(&storage), badges(&storage));
    let bad_week = CourseStateUpdate { current_week: Some(5), main_goal: None };
    assert!(matches!(
        course.update("u1", &bad_week, Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(course.get_state("u1").await.unwrap().is_none());
    assert!(course.update("ghost", &CourseStateUpdate::default(), Utc::now()).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_badge_failure_policy() {
    let storage = storage_with_users(&[]).await;
    let strict = BadgeService::new(Arc::clone(&storage), BadgeFailurePolicy::Propagate);
    assert!(strict.award("ghost", BadgeCode::GoalLocked, Utc::now()).await.is_err());

    let lenient = BadgeService::new(Arc::clone(&storage), BadgeFailurePolicy::LogAndContinue);
    assert!(!lenient.award("ghost", BadgeCode::GoalLocked, Utc::now()).await.unwrap());
    assert_eq!(lenient.catalog().len(), 4);
}
