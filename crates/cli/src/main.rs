use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use coach_core::{CoachConfig, DEMO_USER_ID};
use coach_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "coach-os")]
#[command(about = "AI productivity coach for a four-week course", long_about = None)]
struct Cli {
    /// Use a throwaway in-memory store instead of DATABASE_URL
    #[arg(long, global = true)]
    in_memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Load the demo user before serving
        #[arg(long)]
        seed: bool,
    },
    /// Create the demo user and sample course data
    Seed,
    /// Print a user's dashboard as JSON
    Dashboard {
        #[arg(short, long, default_value = DEMO_USER_ID)]
        user: String,
    },
}

pub(crate) async fn open_storage(config: &CoachConfig, in_memory: bool) -> Result<Arc<StorageBackend>> {
    if in_memory {
        tracing::info!("Using in-memory storage, data is lost on exit");
        return Ok(Arc::new(StorageBackend::new_memory()));
    }
    let Some(url) = config.database_url.as_deref() else {
        bail!("DATABASE_URL environment variable must be set (or pass --in-memory)");
    };
    Ok(Arc::new(StorageBackend::new_postgres(url).await?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CoachConfig::from_env();

    match cli.command {
        Commands::Serve { port, host, seed } => {
            commands::serve::run(&config, cli.in_memory, &host, port, seed).await?;
        },
        Commands::Seed => {
            commands::seed::run(&config, cli.in_memory).await?;
        },
        Commands::Dashboard { user } => {
            commands::dashboard::run(&config, cli.in_memory, &user).await?;
        },
    }

    Ok(())
}
