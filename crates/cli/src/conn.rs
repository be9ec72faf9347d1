use crate::error::CliError;
use tokio_postgres::NoTls;
use tracing::{error, info};

/// Pings the source database with a `SELECT 1`; returns Err if unreachable
/// or if the round-trip produces anything unexpected.
pub async fn ping_postgres(conn_str: &str) -> Result<(), CliError> {
    info!("Pinging Postgres at '{conn_str}'");

    let (client, connection) = tokio_postgres::connect(conn_str, NoTls)
        .await
        .map_err(|e| {
            error!("Postgres connection to '{conn_str}' failed: {e}");
            CliError::Postgres(e)
        })?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("Postgres connection error: {e}");
        }
    });

    let row = client.query_one("SELECT 1", &[]).await.map_err(|e| {
        error!("Postgres ping query on '{conn_str}' failed: {e}");
        CliError::Postgres(e)
    })?;

    let val: i32 = row.get(0);
    if val != 1 {
        let msg = format!("Postgres ping to '{conn_str}' returned unexpected result: {val}");
        error!("{}", msg);
        return Err(CliError::Unexpected(msg));
    }

    info!("Postgres ping to '{conn_str}' succeeded");
    Ok(())
}
