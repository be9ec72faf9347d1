use crate::{error::SyncError, transform, watermark};
use chrono::Utc;
use connectors::{destination::RecordStore, source::SourceReader};
use model::core::timestamp;
use tracing::info;

/// Result of one sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// This many rows were written to the destination.
    Synced(usize),
    /// No source row was newer than the watermark; nothing was written.
    NoNewEntries,
}

/// Runs one synchronization pass: derive the watermark from the current
/// destination state, pull the newer source rows, stamp and push them one
/// record at a time in source order. Any connector failure aborts the run;
/// rows written before the failure stay written.
pub async fn run<S, D>(source: &S, store: &D, table: &str) -> Result<SyncOutcome, SyncError>
where
    S: SourceReader + Sync,
    D: RecordStore + Sync,
{
    info!("Fetching last sync time ...");
    let existing = store.list_records().await?;
    let watermark = watermark::compute(&existing);

    let rows = source.fetch_new_rows(table, watermark).await?;
    if rows.is_empty() {
        return Ok(SyncOutcome::NoNewEntries);
    }

    // One instant for the whole run; every record of this pass carries it.
    let synced_at = timestamp::format_utc(&Utc::now());

    for row in &rows {
        store
            .create_record(transform::to_synced_fields(row, &synced_at))
            .await?;
    }

    Ok(SyncOutcome::Synced(rows.len()))
}
