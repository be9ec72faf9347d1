use thiserror::Error;

/// All errors coming from the source database side.
#[derive(Debug, Error)]
pub enum SourceError {
    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// TLS connector setup or handshake failure.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// A mis-configured connection parameter was specified.
    #[error("Invalid source configuration: {0}")]
    InvalidConfig(String),
}

/// Errors happening against the destination record store.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// Transport-level HTTP failure, including response decoding.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Airtable API error (status {status}): {body}")]
    Api { status: u16, body: String },
}
