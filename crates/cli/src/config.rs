use crate::error::CliError;
use connectors::source::postgres::PgParams;
use serde::Deserialize;

/// The parameter bundle for one run: source connection parameters and
/// destination addressing, both externally supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub source: SourceSettings,
    pub destination: DestinationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub sslmode: Option<String>,
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationSettings {
    pub token: String,
    pub base_id: String,
    pub table_id: String,
    #[serde(default)]
    pub api_url: Option<String>,
}

fn default_port() -> u16 {
    5432
}

impl SourceSettings {
    pub fn pg_params(&self) -> PgParams {
        PgParams {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            sslmode: self.sslmode.clone(),
        }
    }
}

pub async fn load(path: &str) -> Result<SyncConfig, CliError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let config = serde_json::from_str(&raw)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"{
            "source": {
                "host": "db.internal",
                "port": 5433,
                "database": "app",
                "user": "sync",
                "password": "s3cret",
                "sslmode": "require",
                "table": "users"
            },
            "destination": {
                "token": "key123",
                "base_id": "appBase",
                "table_id": "tblUsers"
            }
        }"#;

        let config: SyncConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.source.port, 5433);
        assert_eq!(config.source.table, "users");
        assert_eq!(config.destination.base_id, "appBase");
        assert!(config.destination.api_url.is_none());
    }

    #[test]
    fn port_defaults_to_5432() {
        let raw = r#"{
            "source": {
                "host": "localhost",
                "database": "app",
                "user": "sync",
                "password": "pw",
                "table": "users"
            },
            "destination": {
                "token": "t",
                "base_id": "b",
                "table_id": "tbl"
            }
        }"#;

        let config: SyncConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.source.port, 5432);
        assert!(config.source.sslmode.is_none());
    }
}
