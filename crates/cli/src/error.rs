use sync_core::error::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the configuration file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Failed to parse the configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to run the sync job: {0}")]
    Sync(#[from] SyncError),

    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
