use crate::core::timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Scalar value decoded from one source column. The variant set covers what
/// a `SELECT *` over an arbitrary Postgres table can produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Value {
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Json(v) => v.as_str().map(|s| s.to_string()),
            Value::Uuid(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(timestamp::format_utc(v)),
            Value::Null => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(v) => Some(*v),
            Value::String(v) => timestamp::parse(v),
            _ => None,
        }
    }

    /// Converts into the JSON representation sent to the destination.
    /// Timestamps render in the destination format, dates as ISO dates,
    /// everything else as the natural JSON scalar.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => json!(v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => json!(v),
            Value::Boolean(v) => json!(v),
            Value::Json(v) => v.clone(),
            Value::Uuid(v) => json!(v.to_string()),
            Value::Date(v) => json!(v.to_string()),
            Value::Timestamp(v) => json!(timestamp::format_utc(v)),
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// Named, typed slot in a row; `value` is `None` for SQL NULL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
}

impl FieldValue {
    pub fn new(name: &str, value: Option<Value>) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }
}
