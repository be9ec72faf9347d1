use crate::{error::SourceError, source::SourceReader};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::{
    core::{
        timestamp,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use tokio_postgres::{Client, Config, NoTls, Row, config::SslMode, types::Json as PgJson};
use tracing::{error, info, warn};

/// Connection parameters for the source database. Externally supplied;
/// never generated or validated here beyond what the driver enforces.
#[derive(Debug, Clone)]
pub struct PgParams {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub sslmode: Option<String>,
}

impl PgParams {
    fn to_config(&self) -> Result<Config, SourceError> {
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.user)
            .password(&self.password);
        if let Some(mode) = &self.sslmode {
            config.ssl_mode(parse_ssl_mode(mode)?);
        }
        Ok(config)
    }
}

fn parse_ssl_mode(mode: &str) -> Result<SslMode, SourceError> {
    match mode.to_lowercase().as_str() {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(SourceError::InvalidConfig(format!(
            "Unknown sslmode: {other}"
        ))),
    }
}

pub struct PgSource {
    params: PgParams,
}

impl PgSource {
    /// Holds the parameters only; no connection is made until a fetch runs.
    pub fn new(params: PgParams) -> Self {
        PgSource { params }
    }
}

#[async_trait]
impl SourceReader for PgSource {
    /// Connects, runs the incremental query, and releases the connection
    /// before returning. The client (and with it the spawned driver task)
    /// is dropped on every exit path, so the connection lives exactly from
    /// query start to query end.
    async fn fetch_new_rows(
        &self,
        table: &str,
        watermark: Option<DateTime<Utc>>,
    ) -> Result<Vec<RowData>, SourceError> {
        info!("Connecting to the database ...");
        let client = connect_client(self.params.to_config()?).await?;

        info!("Querying for new entries ...");
        let sql = select_new_rows_sql(table, watermark);
        let rows = client.query(&sql, &[]).await?;
        Ok(rows.iter().map(|row| row_to_data(row, table)).collect())
    }
}

/// Renders the incremental SELECT. The watermark lands in the WHERE clause
/// as a literal in the destination timestamp format, which Postgres coerces
/// for both `timestamp` and `timestamptz` columns. The literal's shape is
/// fixed by the formatter, so nothing user-controlled reaches the query.
fn select_new_rows_sql(table: &str, watermark: Option<DateTime<Utc>>) -> String {
    match watermark {
        Some(ts) => format!(
            "SELECT * FROM {table} WHERE created_at > '{}'",
            timestamp::format_utc(&ts)
        ),
        None => format!("SELECT * FROM {table}"),
    }
}

async fn connect_client(config: Config) -> Result<Client, SourceError> {
    match config.get_ssl_mode() {
        SslMode::Disable => connect_without_tls(config).await,
        SslMode::Prefer => match connect_with_tls(config.clone()).await {
            Ok(client) => Ok(client),
            Err(err) => {
                warn!(%err, "Postgres TLS handshake failed, retrying without TLS");
                connect_without_tls(config).await
            }
        },
        _ => connect_with_tls(config).await,
    }
}

async fn connect_with_tls(config: Config) -> Result<Client, SourceError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

async fn connect_without_tls(config: Config) -> Result<Client, SourceError> {
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

/// Builds a RowData from one result row, taking the column set and types
/// from the result schema.
fn row_to_data(row: &Row, table: &str) -> RowData {
    let field_values = row
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| FieldValue::new(col.name(), decode_value(row, idx, col.type_().name())))
        .collect();
    RowData::new(table, field_values)
}

/// Decodes one column by its Postgres type name. NULLs come back as `None`;
/// unknown types fall back to a string read.
fn decode_value(row: &Row, idx: usize, type_name: &str) -> Option<Value> {
    match type_name {
        "int2" => row.try_get::<_, i16>(idx).ok().map(|v| Value::Int(v as i64)),
        "int4" => row.try_get::<_, i32>(idx).ok().map(|v| Value::Int(v as i64)),
        "int8" => row.try_get::<_, i64>(idx).ok().map(Value::Int),
        "float4" => row
            .try_get::<_, f32>(idx)
            .ok()
            .map(|v| Value::Float(v as f64)),
        "float8" => row.try_get::<_, f64>(idx).ok().map(Value::Float),
        "numeric" => row
            .try_get::<_, Decimal>(idx)
            .ok()
            .and_then(|v| v.to_f64().map(Value::Float)),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, String>(idx).ok().map(Value::String)
        }
        "bool" => row.try_get::<_, bool>(idx).ok().map(Value::Boolean),
        "json" | "jsonb" => row
            .try_get::<_, PgJson<serde_json::Value>>(idx)
            .ok()
            .map(|json| Value::Json(json.0)),
        "uuid" => row.try_get::<_, uuid::Uuid>(idx).ok().map(Value::Uuid),
        "date" => row
            .try_get::<_, chrono::NaiveDate>(idx)
            .ok()
            .map(Value::Date),
        "timestamp" => row
            .try_get::<_, chrono::NaiveDateTime>(idx)
            .ok()
            .map(|naive| Value::Timestamp(DateTime::from_naive_utc_and_offset(naive, Utc))),
        "timestamptz" => row
            .try_get::<_, DateTime<Utc>>(idx)
            .ok()
            .map(Value::Timestamp),
        other => {
            warn!("Unknown column type: {other}, reading as string");
            row.try_get::<_, String>(idx).ok().map(Value::String)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn select_without_watermark_takes_everything() {
        assert_eq!(select_new_rows_sql("users", None), "SELECT * FROM users");
    }

    #[test]
    fn select_with_watermark_filters_on_created_at() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            select_new_rows_sql("users", Some(ts)),
            "SELECT * FROM users WHERE created_at > '2024-01-02T03:04:05.000Z'"
        );
    }

    #[test]
    fn ssl_mode_parsing() {
        assert!(matches!(parse_ssl_mode("disable"), Ok(SslMode::Disable)));
        assert!(matches!(parse_ssl_mode("Require"), Ok(SslMode::Require)));
        assert!(parse_ssl_mode("verify-full-ish").is_err());
    }
}
