use crate::{
    destination::{DestinationRecord, RecordStore},
    error::DestinationError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use tracing::debug;

const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// Airtable REST client, addressed by base id + table id and authenticated
/// with a bearer token.
pub struct AirtableStore {
    http: reqwest::Client,
    api_url: String,
    token: String,
    base_id: String,
    table_id: String,
}

#[derive(Debug, Deserialize)]
struct RecordsPage {
    records: Vec<DestinationRecord>,
}

#[derive(Debug, Serialize)]
struct CreateRecord {
    fields: Map<String, serde_json::Value>,
}

impl AirtableStore {
    pub fn new(token: &str, base_id: &str, table_id: &str) -> Self {
        Self::with_api_url(AIRTABLE_API_URL, token, base_id, table_id)
    }

    /// Points the client at a different API root. Used by tests to target a
    /// local mock server.
    pub fn with_api_url(api_url: &str, token: &str, base_id: &str, table_id: &str) -> Self {
        AirtableStore {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            base_id: base_id.to_string(),
            table_id: table_id.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, self.table_id)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, DestinationError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(DestinationError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn list_records(&self) -> Result<Vec<DestinationRecord>, DestinationError> {
        let url = self.table_url();
        debug!("Listing records from {url}");
        let resp = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let page: RecordsPage = Self::check(resp).await?.json().await?;
        Ok(page.records)
    }

    async fn create_record(
        &self,
        fields: Map<String, serde_json::Value>,
    ) -> Result<DestinationRecord, DestinationError> {
        let url = self.table_url();
        debug!("Creating record in {url}");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&CreateRecord { fields })
            .send()
            .await?;
        let record: DestinationRecord = Self::check(resp).await?.json().await?;
        Ok(record)
    }
}
