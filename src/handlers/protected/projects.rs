use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway;
use crate::error::ApiError;
use crate::models::ProjectCreate;
use crate::validation::ValidJson;

use super::utils::{record_from, record_id, stamp_created};

/// POST /api/projects
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<ProjectCreate>,
) -> Result<Json<Value>, ApiError> {
    let mut record = record_from(&body)?;
    stamp_created(&mut record);

    let stored = gateway::insert_one("projects", record).await?;
    let project_id = record_id(&stored);

    activity::record(user.id, "create", "project", project_id.clone(), body.name.clone(), None);

    Ok(Json(json!({
        "success": true,
        "project_id": project_id,
        "data": stored,
    })))
}
