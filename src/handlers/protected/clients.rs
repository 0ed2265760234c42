use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway::{self, ListQuery};
use crate::error::ApiError;
use crate::models::ClientCreate;
use crate::validation::ValidJson;

use super::utils::{record_from, record_id, stamp_created};

/// POST /api/clients
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<ClientCreate>,
) -> Result<Json<Value>, ApiError> {
    let mut record = record_from(&body)?;
    stamp_created(&mut record);

    let stored = gateway::insert_one("clients", record).await?;
    let client_id = record_id(&stored);

    activity::record(user.id, "create", "client", client_id.clone(), body.name.clone(), None);

    Ok(Json(json!({
        "success": true,
        "client_id": client_id,
        "data": stored,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ClientListParams {
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/clients
pub async fn list(
    Extension(_user): Extension<AuthUser>,
    Query(params): Query<ClientListParams>,
) -> Result<Json<Value>, ApiError> {
    let query = ListQuery {
        filter: params.status.map(|status| ("status".to_string(), status)),
        limit: Some(params.limit),
        offset: Some(params.offset),
        ..Default::default()
    };

    let rows = gateway::select_many("clients", query).await?;

    Ok(Json(json!({
        "success": true,
        "count": rows.len(),
        "data": rows,
    })))
}
