//! Voice agent routes.
//!
//! The canonical agent record lives with the voice provider; the local row
//! is a cache keyed by the provider's assistant id. Provider writes come
//! first, so a disabled adapter or provider failure leaves no local record.
//! Cache writes are skipped (not failed) when the datastore is unconfigured.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway;
use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::models::{CallRequest, VoiceAgentCreate, VoiceAgentUpdate};
use crate::services;
use crate::services::vapi::DEFAULT_LOG_LIMIT;
use crate::validation::ValidJson;

use super::utils::{record_from, stamp_created};

/// POST /api/voice-agents
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<VoiceAgentCreate>,
) -> Result<Json<Value>, ApiError> {
    let created = services::vapi().create_assistant(&body).await?;

    let mut record = record_from(&body)?;
    record.insert("vapi_agent_id".to_string(), Value::String(created.id.clone()));
    record.insert("status".to_string(), Value::String("active".to_string()));
    stamp_created(&mut record);
    cache_write(gateway::insert_one("voice_agents", record).await.map(|_| ()))?;

    activity::record(
        user.id,
        "create",
        "voice_agent",
        created.id.clone(),
        body.name.clone(),
        None,
    );

    Ok(Json(json!({
        "success": true,
        "agent_id": created.id,
        "data": created.data,
    })))
}

/// PATCH /api/voice-agents/:agent_id
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(agent_id): Path<String>,
    ValidJson(body): ValidJson<VoiceAgentUpdate>,
) -> Result<Json<Value>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Update body contains no fields"));
    }

    let data = services::vapi().update_assistant(&agent_id, &body).await?;

    let patch = record_from(&body)?;
    cache_write(
        gateway::update_where("voice_agents", "vapi_agent_id", &agent_id, patch)
            .await
            .map(|_| ()),
    )?;

    let entity_name = body.name.clone().unwrap_or_else(|| agent_id.clone());
    activity::record(user.id, "update", "voice_agent", agent_id.clone(), entity_name, None);

    Ok(Json(json!({
        "success": true,
        "agent_id": agent_id,
        "data": data,
    })))
}

/// DELETE /api/voice-agents/:agent_id
pub async fn remove(
    Extension(user): Extension<AuthUser>,
    Path(agent_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    services::vapi().delete_assistant(&agent_id).await?;

    let mut patch = Map::new();
    patch.insert("status".to_string(), Value::String("deleted".to_string()));
    cache_write(
        gateway::update_where("voice_agents", "vapi_agent_id", &agent_id, patch)
            .await
            .map(|_| ()),
    )?;

    activity::record(
        user.id,
        "delete",
        "voice_agent",
        agent_id.clone(),
        agent_id.clone(),
        None,
    );

    Ok(Json(json!({ "success": true, "agent_id": agent_id })))
}

/// POST /api/voice-agents/:agent_id/call
pub async fn call(
    Extension(_user): Extension<AuthUser>,
    Path(agent_id): Path<String>,
    ValidJson(body): ValidJson<CallRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = services::vapi().start_call(&agent_id, &body.phone_number).await?;
    let call_id = data
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Json(json!({
        "success": true,
        "call_id": call_id,
        "data": data,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LogParams {
    pub limit: Option<u32>,
}

/// GET /voice-agents/:agent_id/logs
pub async fn logs(
    Extension(_user): Extension<AuthUser>,
    Path(agent_id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let data = services::vapi().call_logs(&agent_id, limit).await;

    Ok(Json(json!({ "success": true, "data": data })))
}

/// The local row is only a cache: an unconfigured datastore skips the write
/// instead of failing a provider operation that already succeeded.
fn cache_write(result: Result<(), DatabaseError>) -> Result<(), ApiError> {
    match result {
        Ok(()) => Ok(()),
        Err(DatabaseError::NotConfigured) => {
            warn!("voice agent cache write skipped: database not configured");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
