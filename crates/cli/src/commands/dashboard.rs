use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use coach_core::CoachConfig;
use coach_service::{DashboardService, GamificationService, seed_demo};

use crate::open_storage;

pub(crate) async fn run(config: &CoachConfig, in_memory: bool, user_id: &str) -> Result<()> {
    let storage = open_storage(config, in_memory).await?;
    let now = Utc::now();
    // A fresh in-memory store has nobody to show.
    if in_memory {
        seed_demo(&storage, now.date_naive(), now).await?;
    }

    let gamification = Arc::new(GamificationService::new(Arc::clone(&storage)));
    let dashboard = DashboardService::new(storage, gamification).dashboard(user_id, now.date_naive()).await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
