//! Demo data: one user part-way into week 1, plus a sample plan, entry,
//! three patterns and an onboarding conversation.
//!
//! Safe to run repeatedly: each record is only created when missing.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use coach_core::{
    BadgeCode, CoachMessage, CoachSession, CourseState, DEMO_USER_ID, DailyFields, FocusBlock,
    InteractionMode, MessageRole, PatternInput, User, WeeklyPlanInput,
};
use coach_storage::StorageBackend;
use coach_storage::traits::{
    BadgeStore, CoachSessionStore, CourseStore, DailyEntryStore, PatternStore, UserStore,
    WeeklyPlanStore,
};
use uuid::Uuid;

use crate::ServiceError;

const DEMO_EMAIL: &str = "demo@example.com";

/// What a seed run created. Records that already existed are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub user: bool,
    pub course_state: bool,
    pub weekly_plan: bool,
    pub daily_entry: bool,
    pub patterns: usize,
    pub badges: usize,
    pub coach_session: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn demo_plan() -> WeeklyPlanInput {
    WeeklyPlanInput {
        week_number: 2,
        high_value_tasks: strings(&[
            "Dokončit strategický dokument pro Q1",
            "Prezentace pro vedení",
            "Code review kritických částí",
        ]),
        admin_tasks: strings(&["Odpovědět na emaily", "Týdenní meeting", "Aktualizovat Jiru"]),
        low_value_tasks: strings(&["Prohlédnout newslettery", "Uklidit Slack"]),
        focus_blocks: vec![
            FocusBlock { day_of_week: 1, start_time: "09:00".to_owned(), duration_min: 120 },
            FocusBlock { day_of_week: 3, start_time: "14:00".to_owned(), duration_min: 90 },
        ],
        notes: Some("Tento týden chci dokončit strategický dokument".to_owned()),
    }
}

fn demo_patterns() -> [PatternInput; 3] {
    [
        PatternInput {
            description: "Odkládám psaní reportů, protože nevím kde začít".to_owned(),
            pattern_type: "Nejasné zadání".to_owned(),
            micro_step: "Napsat 3 hlavní otázky, na které má report odpovědět".to_owned(),
            trigger_phrases: strings(&["report", "dokumentace", "dlouhý text"]),
        },
        PatternInput {
            description: "Odkládám code review, protože je to nudné".to_owned(),
            pattern_type: "Nuda/únava".to_owned(),
            micro_step: "Nastavit timer na 10 minut a začít".to_owned(),
            trigger_phrases: strings(&["code review", "kontrola", "review"]),
        },
        PatternInput {
            description: "Odkládám obtížné konverzace s kolegy".to_owned(),
            pattern_type: "Strach z konfliktu".to_owned(),
            micro_step: "Napsat 3 věty, jak chci začít konverzaci".to_owned(),
            trigger_phrases: strings(&["feedback", "konflikt", "obtížná konverzace"]),
        },
    ]
}

fn demo_session(now: DateTime<Utc>) -> CoachSession {
    CoachSession {
        id: Uuid::new_v4().to_string(),
        user_id: DEMO_USER_ID.to_owned(),
        interaction_type: InteractionMode::Onboarding,
        week_number: 1,
        messages: vec![
            CoachMessage::new(
                MessageRole::Assistant,
                "Ahoj! Jsem tvůj AI kouč. Pojďme se poznat. Jaká je tvoje pracovní pozice a co zhruba děláš během týdne?",
                now,
            ),
            CoachMessage::new(
                MessageRole::User,
                "Jsem projektový manažer v tech firmě. Řídím 2 týmy a starám se o komunikaci s klienty.",
                now,
            ),
        ],
        summary: Some("Zahájení onboarding rozhovoru".to_owned()),
        created_at: now,
    }
}

/// Seed the demo user (`demo-user`) and sample course data.
pub async fn seed_demo(
    storage: &StorageBackend,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    if storage.get_user(DEMO_USER_ID).await?.is_none() {
        let mut user = User::new(DEMO_USER_ID, DEMO_EMAIL, "Demo Uživatel");
        user.role_description = Some("Projektový manažer v tech firmě".to_owned());
        user.created_at = now;
        storage.save_user(&user).await?;
        report.user = true;
    }

    if storage.get_course_state(DEMO_USER_ID).await?.is_none() {
        let mut state = CourseState::start(DEMO_USER_ID);
        state.updated_at = now;
        storage.save_course_state(&state).await?;
        report.course_state = true;
    }

    let plan = demo_plan();
    if storage.get_weekly_plan(DEMO_USER_ID, plan.week_number).await?.is_none() {
        storage.upsert_weekly_plan(DEMO_USER_ID, &plan).await?;
        report.weekly_plan = true;
    }

    let yesterday = today - Duration::days(1);
    if storage.get_daily_entry(DEMO_USER_ID, yesterday).await?.is_none() {
        let fields = DailyFields {
            engaged_today: Some(true),
            day_feeling: Some(4),
            frustration_note: Some("Příliš mnoho meetingů".to_owned()),
            ..DailyFields::default()
        };
        storage.upsert_daily_entry(DEMO_USER_ID, yesterday, 1, &fields).await?;
        report.daily_entry = true;
    }

    if storage.count_patterns(DEMO_USER_ID).await? == 0 {
        for pattern in demo_patterns() {
            storage.create_pattern(DEMO_USER_ID, &pattern).await?;
            report.patterns = report.patterns.saturating_add(1);
        }
    }

    if storage.award_badge(DEMO_USER_ID, BadgeCode::GoalLocked, now).await? {
        report.badges = report.badges.saturating_add(1);
    }

    if storage.latest_coach_session(DEMO_USER_ID).await?.is_none() {
        storage.append_coach_session(&demo_session(now)).await?;
        report.coach_session = true;
    }

    tracing::info!(?report, "demo data seeded");
    Ok(report)
}
