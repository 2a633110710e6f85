use anyhow::Result;
use chrono::Utc;
use coach_core::CoachConfig;
use coach_service::seed_demo;

use crate::open_storage;

pub(crate) async fn run(config: &CoachConfig, in_memory: bool) -> Result<()> {
    let storage = open_storage(config, in_memory).await?;
    let now = Utc::now();
    let report = seed_demo(&storage, now.date_naive(), now).await?;
    println!("{report:#?}");
    Ok(())
}
