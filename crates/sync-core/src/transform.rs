use model::records::row::RowData;
use serde_json::Map;

/// Builds the destination field map for one source row. Every column passes
/// through as JSON (timestamps render in the destination format, so
/// `created_at` comes out reformatted), and `synced_at` is appended with
/// the run's shared instant. SQL NULLs become JSON nulls.
pub fn to_synced_fields(row: &RowData, synced_at: &str) -> Map<String, serde_json::Value> {
    let mut fields = Map::with_capacity(row.field_values.len() + 1);
    for field in &row.field_values {
        let json = field
            .value
            .as_ref()
            .map(|v| v.to_json())
            .unwrap_or(serde_json::Value::Null);
        fields.insert(field.name.clone(), json);
    }
    fields.insert("synced_at".to_string(), synced_at.into());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use model::core::value::{FieldValue, Value};
    use serde_json::json;

    const RUN_TS: &str = "2024-06-01T12:00:00.000Z";

    #[test]
    fn created_at_is_reformatted_and_synced_at_appended() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let row = RowData::new(
            "users",
            vec![
                FieldValue::new("id", Some(Value::Int(7))),
                FieldValue::new("created_at", Some(Value::Timestamp(created))),
            ],
        );

        let fields = to_synced_fields(&row, RUN_TS);
        assert_eq!(fields.get("created_at").unwrap(), &json!("2024-01-02T03:04:05.000Z"));
        assert_eq!(fields.get("synced_at").unwrap(), &json!(RUN_TS));
    }

    #[test]
    fn arbitrary_columns_pass_through() {
        let row = RowData::new(
            "widgets",
            vec![
                FieldValue::new("frobnication_level", Some(Value::Float(2.5))),
                FieldValue::new("is_shiny", Some(Value::Boolean(true))),
                FieldValue::new("notes", Some(Value::String("löng tèxt".into()))),
                FieldValue::new("payload", Some(Value::Json(json!({"a": [1, 2]})))),
            ],
        );

        let fields = to_synced_fields(&row, RUN_TS);
        assert_eq!(fields.get("frobnication_level").unwrap(), &json!(2.5));
        assert_eq!(fields.get("is_shiny").unwrap(), &json!(true));
        assert_eq!(fields.get("notes").unwrap(), &json!("löng tèxt"));
        assert_eq!(fields.get("payload").unwrap(), &json!({"a": [1, 2]}));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn sql_null_becomes_json_null() {
        let row = RowData::new("users", vec![FieldValue::new("nickname", None)]);
        let fields = to_synced_fields(&row, RUN_TS);
        assert_eq!(fields.get("nickname").unwrap(), &serde_json::Value::Null);
    }
}
