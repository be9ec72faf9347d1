use chrono::{DateTime, Utc};
use connectors::destination::DestinationRecord;
use model::core::timestamp;
use tracing::warn;

/// Computes the sync watermark: the maximum `synced_at` among the existing
/// destination records, parsed as a timestamp. `None` when the destination
/// is empty or no record carries a parseable `synced_at`. Records written
/// by this job always parse; hand-entered ones that do not are skipped
/// rather than failing the run.
pub fn compute(records: &[DestinationRecord]) -> Option<DateTime<Utc>> {
    records
        .iter()
        .filter_map(|record| {
            let raw = record.fields.get("synced_at").and_then(|v| v.as_str())?;
            let parsed = timestamp::parse(raw);
            if parsed.is_none() {
                warn!("Skipping record {} with unparseable synced_at: {raw}", record.id);
            }
            parsed
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, synced_at: Option<&str>) -> DestinationRecord {
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), json!("x"));
        if let Some(ts) = synced_at {
            fields.insert("synced_at".into(), json!(ts));
        }
        DestinationRecord {
            id: id.to_string(),
            fields,
        }
    }

    #[test]
    fn empty_destination_has_no_watermark() {
        assert_eq!(compute(&[]), None);
    }

    #[test]
    fn picks_maximum_synced_at_regardless_of_order() {
        let t1 = "2024-01-01T00:00:00.000Z";
        let t2 = "2024-01-02T00:00:00.000Z";
        let t3 = "2024-01-03T00:00:00.000Z";

        let forward = [record("a", Some(t1)), record("b", Some(t2)), record("c", Some(t3))];
        let shuffled = [record("c", Some(t3)), record("a", Some(t1)), record("b", Some(t2))];

        let expected = timestamp::parse(t3);
        assert_eq!(compute(&forward), expected);
        assert_eq!(compute(&shuffled), expected);
    }

    #[test]
    fn compares_as_timestamps_not_strings() {
        // Lexicographic comparison of these strings would pick the wrong one
        // if the year had fewer digits in one value; parse failures are
        // skipped entirely.
        let records = [
            record("a", Some("2024-01-10T00:00:00.000Z")),
            record("b", Some("2024-01-09T23:59:59.000Z")),
            record("c", Some("not-a-timestamp")),
            record("d", None),
        ];
        assert_eq!(compute(&records), timestamp::parse("2024-01-10T00:00:00.000Z"));
    }

    #[test]
    fn all_unparseable_means_absent() {
        let records = [record("a", Some("yesterday")), record("b", None)];
        assert_eq!(compute(&records), None);
    }
}
