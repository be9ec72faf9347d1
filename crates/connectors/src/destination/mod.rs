use crate::error::DestinationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Map;

pub mod airtable;

/// One entry in the remote record store: an opaque id plus a field mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub id: String,
    pub fields: Map<String, serde_json::Value>,
}

/// Write side of the sync. Exactly two operations are needed: a full
/// listing (to find the prior `synced_at` high-water mark) and a single
/// record create. No update or delete.
#[async_trait]
pub trait RecordStore {
    async fn list_records(&self) -> Result<Vec<DestinationRecord>, DestinationError>;

    async fn create_record(
        &self,
        fields: Map<String, serde_json::Value>,
    ) -> Result<DestinationRecord, DestinationError>;
}
