use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use interester_ai::{SummaryClient, WebSearchClient};
use interester_http::{create_router, AppState};
use interester_storage::{
    initialize_storage, InterestStore, PreferencesStore, ResultStore, StorageConfig,
    StorageContext,
};

#[derive(Parser)]
#[command(name = "interester")]
#[command(about = "Track search topics and summarize what the web says about them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        #[arg(short, long, default_value = "5173")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// List all tracked interests.
    Interests,
    /// Show the stored preferences.
    Prefs,
    /// Show stored results for an interest.
    Results { interest_id: String },
    /// Search the web for an interest and store a fresh summary.
    Run { interest_id: String },
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("interester").join("data")
}

fn load_config() -> Result<StorageConfig> {
    let mut config = StorageConfig::from_env()?;
    if std::env::var("INTERESTER_DATA_DIR").is_err() {
        config.data_dir = default_data_dir();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = load_config()?;
    let ctx = Arc::new(StorageContext::new());
    initialize_storage(&ctx, &config)?;

    match cli.command {
        Commands::Serve { port, host } => {
            interester_ai::warn_missing_keys();
            let state = Arc::new(AppState::new(Arc::clone(&ctx), config.data_dir.clone()));
            let router = create_router(state);
            let addr = format!("{host}:{port}");
            tracing::info!("Starting HTTP server on {addr}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Interests => {
            let store = InterestStore::new(ctx);
            let interests = store.get_all().await?;
            println!("{}", serde_json::to_string_pretty(&interests)?);
        }
        Commands::Prefs => {
            let store = PreferencesStore::new(ctx);
            let prefs = store.get().await?;
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
        Commands::Results { interest_id } => {
            let store = ResultStore::new(ctx);
            let results = store.get_by_interest_id(&interest_id).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Run { interest_id } => {
            let interests = InterestStore::new(Arc::clone(&ctx));
            let prefs = PreferencesStore::new(Arc::clone(&ctx));
            let results = ResultStore::new(ctx);

            let interest = interests
                .get_by_id(&interest_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("no interest with id {interest_id}"))?;

            let search_client = WebSearchClient::from_env()?;
            let summary_client = SummaryClient::from_env()?;
            let max_results = prefs.get().await?.max_results_per_search as usize;

            tracing::info!(name = %interest.name, "running search");
            let hits = search_client.search(&interest, max_results).await?;
            if hits.is_empty() {
                tracing::warn!("search returned no hits; nothing to summarize");
                return Ok(());
            }

            let search_id = Uuid::new_v4().to_string();
            let formatted = summary_client.summarize(&interest, &search_id, &hits).await?;
            results.save(&interest.id, &[formatted.clone()]).await?;
            println!("{}", serde_json::to_string_pretty(&formatted)?);
        }
    }

    Ok(())
}
