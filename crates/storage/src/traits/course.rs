use async_trait::async_trait;
use coach_core::{CourseState, User};

use crate::error::StorageError;

/// User accounts. Authentication lives outside this service.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or replace a user by ID.
    async fn save_user(&self, user: &User) -> Result<(), StorageError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;
}

/// One course-state row per user.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn get_course_state(&self, user_id: &str) -> Result<Option<CourseState>, StorageError>;

    /// Insert or replace the user's course state.
    async fn save_course_state(&self, state: &CourseState) -> Result<(), StorageError>;
}
