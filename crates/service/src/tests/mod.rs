mod badge_tests;
mod dashboard_tests;
mod tracker_tests;

use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{BadgeFailurePolicy, User};
use coach_storage::StorageBackend;
use coach_storage::traits::UserStore;

#[allow(clippy::unwrap_used, reason = "test code")]
pub(crate) async fn storage_with_users(ids: &[&str]) -> Arc<StorageBackend> {
    let storage = StorageBackend::new_memory();
    for id in ids {
        let user = User::new(*id, format!("{id}@example.com"), format!("Klient {id}"));
        storage.save_user(&user).await.unwrap();
    }
    Arc::new(storage)
}

pub(crate) fn badges(storage: &Arc<StorageBackend>) -> Arc<crate::BadgeService> {
    Arc::new(crate::BadgeService::new(Arc::clone(storage), BadgeFailurePolicy::Propagate))
}

#[allow(clippy::unwrap_used, reason = "test code")]
pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
