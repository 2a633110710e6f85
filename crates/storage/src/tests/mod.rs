//! Test utilities and module declarations for storage tests.

use chrono::NaiveDate;
use coach_core::User;

use crate::MemoryStorage;
use crate::traits::UserStore;

#[allow(clippy::unwrap_used, reason = "test code")]
pub async fn create_test_storage(user_ids: &[&str]) -> MemoryStorage {
    let storage = MemoryStorage::new();
    for id in user_ids {
        storage.save_user(&User::new(*id, format!("{id}@example.com"), "Test User")).await.unwrap();
    }
    storage
}

#[allow(clippy::unwrap_used, reason = "test code")]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
