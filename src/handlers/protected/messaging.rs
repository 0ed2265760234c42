use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::SmsSendRequest;
use crate::services;
use crate::validation::ValidJson;

/// POST /sms/send
pub async fn send_sms(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<SmsSendRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = services::twilio().send_message(&body.to, &body.message).await?;

    Ok(Json(json!({ "success": true, "data": data })))
}

/// GET /phone-numbers
///
/// The listing degrades to an empty array when the adapter is disabled or
/// the provider fails; this route never reports a telephony error.
pub async fn phone_numbers(
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let data = services::twilio().list_phone_numbers().await;

    Ok(Json(json!({ "success": true, "data": data })))
}
