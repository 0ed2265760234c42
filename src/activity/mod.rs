//! Append-only audit trail.
//!
//! Recording is fire-and-forget: the append runs on a detached task after
//! the route has already decided its response. A failed append is logged and
//! swallowed; it can never surface as a request error, and nothing orders
//! the append relative to the response reaching the caller.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::database::gateway;

const COLLECTION: &str = "activities";

/// Schedule one audit row for a completed mutation.
pub fn record(
    user_id: String,
    action: &'static str,
    entity_type: &'static str,
    entity_id: String,
    entity_name: String,
    details: Option<Value>,
) {
    // Timestamp is taken now, not when the detached task runs.
    let entry = json!({
        "user_id": user_id,
        "action": action,
        "entity_type": entity_type,
        "entity_id": entity_id,
        "entity_name": entity_name,
        "details": details.unwrap_or_else(|| json!({})),
        "created_at": Utc::now(),
    });

    let entry = match entry {
        Value::Object(map) => map,
        _ => return,
    };

    tokio::spawn(async move {
        if let Err(e) = gateway::insert_one(COLLECTION, entry).await {
            warn!("activity append failed: {}", e);
        }
    });
}
