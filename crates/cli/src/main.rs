use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::{destination::airtable::AirtableStore, source::postgres::PgSource};
use sync_core::job::{self, SyncOutcome};
use tracing::{Level, info};

mod commands;
mod config;
mod conn;
mod error;

#[derive(Parser)]
#[command(
    name = "airsync",
    version = "0.0.1",
    about = "PostgreSQL to Airtable incremental sync"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            let config = config::load(&config).await?;
            let outcome = run_sync(&config).await?;
            match outcome {
                SyncOutcome::Synced(count) => {
                    println!("New entries were successfully pushed to Airtable! ({count} rows)")
                }
                SyncOutcome::NoNewEntries => println!("No new entries found."),
            }
        }
        Commands::TestConn { conn_str } => {
            conn::ping_postgres(&conn_str).await?;
        }
    }

    Ok(())
}

async fn run_sync(config: &config::SyncConfig) -> Result<SyncOutcome, CliError> {
    info!("Starting sync for table '{}'", config.source.table);

    let source = PgSource::new(config.source.pg_params());

    let dest = &config.destination;
    let store = match &dest.api_url {
        Some(url) => AirtableStore::with_api_url(url, &dest.token, &dest.base_id, &dest.table_id),
        None => AirtableStore::new(&dest.token, &dest.base_id, &dest.table_id),
    };

    let outcome = job::run(&source, &store, &config.source.table).await?;
    Ok(outcome)
}
