//! PostgreSQL schema migrations for coach-os storage.

use anyhow::Result;
use coach_core::BadgeCode;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            role_description TEXT,
            work_context TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS course_states (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            current_week SMALLINT NOT NULL DEFAULT 1 CHECK (current_week BETWEEN 1 AND 4),
            main_goal TEXT,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            week_number SMALLINT NOT NULL,
            engaged_today BOOLEAN,
            day_feeling SMALLINT,
            frustration_note TEXT,
            focus_block_done TEXT,
            high_impact_step TEXT,
            disruption_reason TEXT,
            procrastination_event BOOLEAN,
            micro_step_used BOOLEAN,
            micro_step_context TEXT,
            system_alignment SMALLINT,
            positive_event TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (user_id, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_daily_user_week ON daily_entries (user_id, week_number)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_plans (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            week_number SMALLINT NOT NULL,
            high_value_tasks JSONB NOT NULL DEFAULT '[]',
            admin_tasks JSONB NOT NULL DEFAULT '[]',
            low_value_tasks JSONB NOT NULL DEFAULT '[]',
            focus_blocks JSONB NOT NULL DEFAULT '[]',
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (user_id, week_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS procrastination_patterns (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            description TEXT NOT NULL,
            pattern_type TEXT NOT NULL,
            micro_step TEXT NOT NULL,
            trigger_phrases JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_patterns_user ON procrastination_patterns (user_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS operating_systems (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            planning_rules JSONB NOT NULL DEFAULT '[]',
            anti_procrastination_rules JSONB NOT NULL DEFAULT '[]',
            visible_changes JSONB NOT NULL DEFAULT '[]',
            ai_summary TEXT,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS streaks (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            metric TEXT NOT NULL,
            current_streak INTEGER NOT NULL CHECK (current_streak >= 1),
            longest_streak INTEGER NOT NULL,
            last_date DATE NOT NULL,
            PRIMARY KEY (user_id, metric),
            CHECK (current_streak <= longest_streak)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS badges (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            icon TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_badges (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            badge_code TEXT NOT NULL REFERENCES badges(code),
            earned_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (user_id, badge_code)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS coach_sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            interaction_type TEXT NOT NULL,
            week_number SMALLINT NOT NULL,
            messages JSONB NOT NULL DEFAULT '[]',
            summary TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            seq BIGSERIAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Tables created before insertion order was tracked.
    sqlx::query("ALTER TABLE coach_sessions ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_coach_sessions_lookup
         ON coach_sessions (user_id, interaction_type, week_number, created_at DESC)",
    )
    .execute(pool)
    .await?;

    seed_badge_catalog(pool).await?;

    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}

/// Keep the `badges` table in sync with the compiled-in catalog.
async fn seed_badge_catalog(pool: &PgPool) -> Result<()> {
    for code in BadgeCode::ALL {
        let badge = code.badge();
        sqlx::query(
            "INSERT INTO badges (code, name, description, icon) VALUES ($1, $2, $3, $4)
             ON CONFLICT (code) DO UPDATE SET
               name = EXCLUDED.name,
               description = EXCLUDED.description,
               icon = EXCLUDED.icon",
        )
        .bind(code.as_str())
        .bind(badge.name)
        .bind(badge.description)
        .bind(badge.icon)
        .execute(pool)
        .await?;
    }
    Ok(())
}
