use crate::error::SourceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::records::row::RowData;

pub mod postgres;

/// Read side of the sync: hands back every row of `table` created after the
/// watermark, or every row when no watermark exists. Column names come from
/// the query result schema, never from configuration.
#[async_trait]
pub trait SourceReader {
    async fn fetch_new_rows(
        &self,
        table: &str,
        watermark: Option<DateTime<Utc>>,
    ) -> Result<Vec<RowData>, SourceError>;
}
