use std::sync::Arc;

use coach_core::{DailyEntryInput, DailyFields, StreakMetric, StreakUpdate};

use super::{day, storage_with_users};
use crate::{StreakService, TrackerService};

fn tracker(storage: &Arc<coach_storage::StorageBackend>) -> (TrackerService, Arc<StreakService>) {
    let streaks = Arc::new(StreakService::new(Arc::clone(storage)));
    (TrackerService::new(Arc::clone(storage), Arc::clone(&streaks)), streaks)
}

fn input(date: &str, week: u8, fields: DailyFields) -> DailyEntryInput {
    DailyEntryInput { date: date.to_owned(), week_number: week, fields }
}

fn meaningful(step: &str) -> DailyFields {
    DailyFields { high_impact_step: Some(step.to_owned()), ..DailyFields::default() }
}

#[tokio::test]
async fn test_consecutive_entries_extend_meaningful_streak() {
    let storage = storage_with_users(&["u1"]).await;
    let (tracker, streaks) = tracker(&storage);

    tracker.save_entry("u1", &input("2024-03-04", 2, meaningful("Strategie"))).await.unwrap();
    tracker.save_entry("u1", &input("2024-03-05", 2, meaningful("Prezentace"))).await.unwrap();
    tracker.save_entry("u1", &input("2024-03-06T21:15:00+01:00", 2, meaningful("Review"))).await.unwrap();

    let all = streaks.list("u1").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].metric, StreakMetric::MeaningfulStep);
    assert_eq!(all[0].current_streak, 3);
    assert_eq!(all[0].longest_streak, 3);
    assert_eq!(all[0].last_date, day(2024, 3, 6));
}

#[tokio::test]
async fn test_same_day_resave_leaves_streak_unchanged() {
    let storage = storage_with_users(&["u1"]).await;
    let (tracker, streaks) = tracker(&storage);

    tracker.save_entry("u1", &input("2024-03-04", 2, meaningful("Strategie"))).await.unwrap();
    tracker.save_entry("u1", &input("2024-03-04", 2, meaningful("Strategie v2"))).await.unwrap();

    let (streak, update) =
        streaks.record_activity("u1", StreakMetric::MeaningfulStep, day(2024, 3, 4)).await.unwrap();
    assert_eq!(update, StreakUpdate::Unchanged);
    assert_eq!(streak.current_streak, 1);
}

#[tokio::test]
async fn test_gap_resets_current_keeps_longest() {
    let storage = storage_with_users(&["u1"]).await;
    let (_, streaks) = tracker(&storage);
    for d in [1, 2, 3] {
        streaks.record_activity("u1", StreakMetric::MicroStepUsed, day(2024, 3, d)).await.unwrap();
    }
    let (streak, update) =
        streaks.record_activity("u1", StreakMetric::MicroStepUsed, day(2024, 3, 7)).await.unwrap();
    assert_eq!(update, StreakUpdate::Broken);
    assert_eq!((streak.current_streak, streak.longest_streak), (1, 3));
}

#[tokio::test]
async fn test_micro_step_and_whitespace_step_streak_triggers() {
    let storage = storage_with_users(&["u1"]).await;
    let (tracker, streaks) = tracker(&storage);
    let fields = DailyFields {
        micro_step_used: Some(true),
        high_impact_step: Some("   ".to_owned()),
        ..DailyFields::default()
    };
    tracker.save_entry("u1", &input("2024-03-18", 3, fields)).await.unwrap();

    let mut metrics: Vec<_> = streaks.list("u1").await.unwrap().iter().map(|s| s.metric).collect();
    metrics.sort_by_key(|m| m.as_str());
    assert_eq!(metrics, vec![StreakMetric::MeaningfulStep, StreakMetric::MicroStepUsed]);

    let empty = DailyFields { high_impact_step: Some(String::new()), ..DailyFields::default() };
    tracker.save_entry("u1", &input("2024-03-19", 3, empty)).await.unwrap();
    let meaningful = streaks
        .list("u1")
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.metric == StreakMetric::MeaningfulStep)
        .unwrap();
    assert_eq!(meaningful.last_date, day(2024, 3, 18));
}

#[tokio::test]
async fn test_resave_keeps_unset_fields_and_creation_week() {
    let storage = storage_with_users(&["u1"]).await;
    let (tracker, _) = tracker(&storage);
    let first = DailyFields {
        engaged_today: Some(true),
        frustration_note: Some("Příliš mnoho meetingů".to_owned()),
        ..DailyFields::default()
    };
    let created = tracker.save_entry("u1", &input("2024-03-04", 1, first)).await.unwrap();

    let second = DailyFields { day_feeling: Some(4), ..DailyFields::default() };
    let updated = tracker.save_entry("u1", &input("2024-03-04", 2, second)).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.week_number, 1);
    assert_eq!(updated.fields.day_feeling, Some(4));
    assert_eq!(updated.fields.frustration_note.as_deref(), Some("Příliš mnoho meetingů"));
}

#[tokio::test]
async fn test_invalid_entry_rejected_before_storage() {
    let storage = storage_with_users(&["u1"]).await;
    let (tracker, _) = tracker(&storage);
    let fields = DailyFields { day_feeling: Some(9), ..DailyFields::default() };

    let err = tracker.save_entry("u1", &input("2024-03-04", 1, fields)).await.unwrap_err();
    assert!(matches!(err, crate::ServiceError::InvalidInput(_)));
    let err = tracker.save_entry("u1", &input("not a date", 1, DailyFields::default())).await.unwrap_err();
    assert!(matches!(err, crate::ServiceError::InvalidInput(_)));
    assert!(tracker.list_entries("u1", None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_entry_for_unknown_user_is_not_found() {
    let storage = storage_with_users(&[]).await;
    let (tracker, _) = tracker(&storage);
    let err = tracker.save_entry("ghost", &input("2024-03-04", 1, DailyFields::default())).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_entries_filters_and_orders_newest_first() {
    let storage = storage_with_users(&["u1", "u2"]).await;
    let (tracker, _) = tracker(&storage);
    for (date, week) in [("2024-03-04", 1), ("2024-03-11", 2), ("2024-03-12", 2)] {
        tracker.save_entry("u1", &input(date, week, DailyFields::default())).await.unwrap();
    }
    tracker.save_entry("u2", &input("2024-03-12", 2, DailyFields::default())).await.unwrap();

    let week_two = tracker.list_entries("u1", None, Some(2)).await.unwrap();
    let dates: Vec<_> = week_two.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(2024, 3, 12), day(2024, 3, 11)]);

    let on_day = tracker.list_entries("u1", Some(day(2024, 3, 4)), None).await.unwrap();
    assert_eq!(on_day.len(), 1);
}
