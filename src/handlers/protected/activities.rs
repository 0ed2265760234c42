use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::gateway::{self, ListQuery};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ActivityListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/activities - the caller's own audit rows, newest first.
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivityListParams>,
) -> Result<Json<Value>, ApiError> {
    let query = ListQuery {
        filter: Some(("user_id".to_string(), user.id.clone())),
        order_desc: Some("created_at".to_string()),
        limit: Some(params.limit),
        offset: Some(params.offset),
    };

    let rows = gateway::select_many("activities", query).await?;

    Ok(Json(json!({ "success": true, "data": rows })))
}
