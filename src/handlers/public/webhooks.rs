//! Inbound provider webhooks.
//!
//! These endpoints are unauthenticated and perform no signature
//! verification, so any caller can forge an event - a known security gap of
//! this surface. They acknowledge unconditionally: a malformed or
//! unrecognized payload is logged and still answered with success, so the
//! provider's retry logic never sees a rejection.

use axum::{body::Bytes, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

/// POST /webhooks/vapi
pub async fn vapi(body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => {
            let event = payload
                .get("event_type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            info!("vapi webhook received: {}", event);
        }
        Err(e) => warn!("ignoring malformed vapi webhook payload: {}", e),
    }

    Json(json!({ "success": true }))
}

/// POST /webhooks/stripe
pub async fn stripe(body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => {
            let event = payload
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            info!("stripe webhook received: {}", event);
        }
        Err(e) => warn!("ignoring malformed stripe webhook payload: {}", e),
    }

    Json(json!({ "success": true }))
}
