//! Conversion from caller-supplied JSON documents into template values.

use crate::value::{Record, Value};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_temporal(text: &str) -> Option<Value> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Value::DateTime(dt));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(Value::from)
}

fn object_to_record(map: serde_json::Map<String, JsonValue>) -> Record {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => parse_temporal(&s).unwrap_or(Value::Text(s)),
            JsonValue::Array(items) => {
                if !items.is_empty() && items.iter().all(JsonValue::is_object) {
                    let records = items
                        .into_iter()
                        .filter_map(|item| match item {
                            JsonValue::Object(map) => Some(object_to_record(map)),
                            _ => None,
                        })
                        .collect();
                    Value::RecordArray(records)
                } else {
                    Value::List(items.into_iter().map(Value::from).collect())
                }
            }
            JsonValue::Object(map) => Value::Map(object_to_record(map)),
        }
    }
}
