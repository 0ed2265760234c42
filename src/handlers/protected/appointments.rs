use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway;
use crate::error::ApiError;
use crate::models::AppointmentCreate;
use crate::validation::ValidJson;

use super::utils::{record_from, record_id, stamp_created};

/// POST /api/appointments
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<AppointmentCreate>,
) -> Result<Json<Value>, ApiError> {
    let mut record = record_from(&body)?;
    stamp_created(&mut record);

    let stored = gateway::insert_one("appointments", record).await?;
    let appointment_id = record_id(&stored);

    activity::record(
        user.id,
        "create",
        "appointment",
        appointment_id.clone(),
        body.display_name(),
        None,
    );

    Ok(Json(json!({
        "success": true,
        "appointment_id": appointment_id,
        "data": stored,
    })))
}
