use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Serialize a validated request body into a record map for insertion.
pub fn record_from<T: Serialize>(body: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::internal("request body did not serialize to an object")),
        Err(e) => Err(ApiError::internal(format!("failed to serialize record: {}", e))),
    }
}

/// Entity shaping that belongs to the route layer: every stored record gets
/// its creation timestamps here, not in the gateway.
pub fn stamp_created(record: &mut Map<String, Value>) {
    let now = Utc::now().to_rfc3339();
    record.insert("created_at".to_string(), Value::String(now.clone()));
    record.insert("updated_at".to_string(), Value::String(now));
}

pub fn record_id(record: &Map<String, Value>) -> String {
    record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Body {
        name: String,
    }

    #[test]
    fn record_from_body_and_stamping() {
        let mut record = record_from(&Body { name: "Acme".into() }).expect("record");
        stamp_created(&mut record);

        assert_eq!(record["name"], "Acme");
        assert!(record["created_at"].is_string());
        assert_eq!(record["created_at"], record["updated_at"]);
    }

    #[test]
    fn record_id_reads_string_ids() {
        let record = json!({ "id": "abc-123", "name": "Acme" });
        let record = record.as_object().cloned().expect("object");
        assert_eq!(record_id(&record), "abc-123");

        let empty = Map::new();
        assert_eq!(record_id(&empty), "");
    }
}
