use anyhow::{Context, Result};
use tracing::{info, warn};

mod analysis;
mod config;
mod dashboard;
mod message;
mod net;
mod scorer;
mod server;
mod store;

use config::Config;
use scorer::{DetoxifyClient, LexiconModel, Scorer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not fatal, every setting has a default
        info!("No .env file found or failed to load: {}", e);
    }

    // Initialize logging with default filter if RUST_LOG is not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Toxiboard starting...");

    let config = Config::from_env()?;
    let scorer = build_scorer(&config)?;
    if scorer.is_heuristic() {
        warn!(
            "DETOXIFY_URL not set, falling back to the built-in phrase lexicon. \
             Scores are heuristic, not classifier output"
        );
    }

    let store = store::SampleStore::builtin();
    info!(
        "Scoring {} sample messages with the {} model",
        store.len(),
        scorer.model_name()
    );
    let records = analysis::score_all(&store, &scorer).await?;

    let flagged = records.iter().filter(|r| r.is_toxic).count();
    info!("{} of {} messages flagged as toxic", flagged, records.len());

    let dashboard = dashboard::Dashboard::build(records)?;
    let app = server::DashboardServer::new(dashboard).router();

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    let local_ip = net::local_ip();
    info!("Access on your phone: {}", net::access_url(local_ip, config.port));
    info!("On same WiFi network!");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        res = axum::serve(listener, app) => {
            res.context("Server stopped with error")?;
        }
    }

    Ok(())
}

fn build_scorer(config: &Config) -> Result<Scorer> {
    match &config.detoxify_url {
        Some(url) => {
            let client = DetoxifyClient::new(url, config.detoxify_timeout)?;
            info!("Using Detoxify service at {}", client.endpoint());
            Ok(Scorer::new(client))
        }
        None => Ok(Scorer::new(LexiconModel::new())),
    }
}
