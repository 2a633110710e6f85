//! UserStore and CourseStore implementations for PgStorage.

use async_trait::async_trait;
use coach_core::{CourseState, User};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, small_to_u8};
use crate::error::StorageError;
use crate::traits::{CourseStore, UserStore};

const USER_COLUMNS: &str = "id, email, name, role_description, work_context, created_at";
const COURSE_COLUMNS: &str = "user_id, current_week, main_goal, updated_at";

fn row_to_user(row: &PgRow) -> Result<User, StorageError> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        role_description: row.try_get("role_description")?,
        work_context: row.try_get("work_context")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_course_state(row: &PgRow) -> Result<CourseState, StorageError> {
    Ok(CourseState {
        user_id: row.try_get("user_id")?,
        current_week: small_to_u8(row.try_get("current_week")?, "current_week")?,
        main_goal: row.try_get("main_goal")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserStore for PgStorage {
    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO users ({USER_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
               email = EXCLUDED.email,
               name = EXCLUDED.name,
               role_description = EXCLUDED.role_description,
               work_context = EXCLUDED.work_context"
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role_description)
        .bind(&user.work_context)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }
}

#[async_trait]
impl CourseStore for PgStorage {
    async fn get_course_state(&self, user_id: &str) -> Result<Option<CourseState>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {COURSE_COLUMNS} FROM course_states WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_course_state(&r)).transpose()
    }

    async fn save_course_state(&self, state: &CourseState) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO course_states ({COURSE_COLUMNS})
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET
               current_week = EXCLUDED.current_week,
               main_goal = EXCLUDED.main_goal,
               updated_at = EXCLUDED.updated_at"
        ))
        .bind(&state.user_id)
        .bind(i16::from(state.current_week))
        .bind(&state.main_goal)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
