use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use coach_core::CoachConfig;
use coach_http::{AppState, create_router};
use coach_llm::LlmClient;
use coach_service::seed_demo;

use crate::open_storage;

pub(crate) async fn run(
    config: &CoachConfig,
    in_memory: bool,
    host: &str,
    port: u16,
    seed: bool,
) -> Result<()> {
    let storage = open_storage(config, in_memory).await?;
    tracing::info!(backend = storage.kind(), "Storage ready");
    if seed {
        let now = Utc::now();
        seed_demo(&storage, now.date_naive(), now).await?;
    }

    let llm = match LlmClient::from_settings(&config.llm)? {
        Some(client) => {
            tracing::info!(base_url = client.base_url(), model = client.model(), "AI coach enabled");
            Some(Arc::new(client))
        },
        None => {
            tracing::warn!("OPENAI_API_KEY not set, coach chat will answer 503");
            None
        },
    };

    let state = Arc::new(AppState::new(storage, llm, config.badge_failure_policy));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
