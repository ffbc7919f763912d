use anyhow::Context;
use clap::Parser;
use sinalbot::api::SourceChain;
use sinalbot::signal::SignalPipeline;
use sinalbot::storage::PostgresStore;
use sinalbot::worker::Worker;
use sinalbot::{SignalConfig, WorkerConfig};
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Signal worker: one LONG/SHORT/NO-ENTRY decision per active symbol and
/// horizon, written to Postgres.
#[derive(Parser)]
#[command(name = "sinalbot")]
struct Cli {
    /// Keep running, executing one pass per interval, instead of a single
    /// cron-style pass
    #[arg(long)]
    watch: bool,

    /// Minutes between passes in watch mode
    #[arg(long, default_value_t = 10)]
    interval_minutes: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let store = init_store(&database_url).await?;

    let worker = Worker::new(
        store.clone(),
        store.clone(),
        store,
        SourceChain::default(),
        SignalPipeline::new(SignalConfig::default()),
        WorkerConfig::default(),
    );

    if cli.watch {
        tracing::info!(interval_minutes = cli.interval_minutes, "watch mode");
        let mut ticker = interval(Duration::from_secs(cli.interval_minutes * 60));
        loop {
            ticker.tick().await;
            if let Err(e) = worker.run_pass().await {
                tracing::error!(error = %e, "pass failed, waiting for next tick");
            }
        }
    } else {
        // Single pass; a fatal error becomes a non-zero exit for the scheduler
        worker.run_pass().await?;
    }

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sinalbot=info".into()),
        )
        .init();
}

/// Connect and verify the schema. A failure here is fatal before any symbol
/// work starts; the status sink itself may be the broken database, so the
/// terminal entry goes to the process log.
async fn init_store(database_url: &str) -> sinalbot::Result<Arc<PostgresStore>> {
    let store = PostgresStore::connect(database_url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "persistence initialization failed"))?;
    let store = Arc::new(store);
    store
        .init_schema()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "persistence initialization failed"))?;
    Ok(store)
}
