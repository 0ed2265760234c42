use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::CalendarCallback;
use crate::services;
use crate::validation::ValidJson;

/// GET /api/google-calendar/auth-url
///
/// The caller's own id is the OAuth `state`, so the callback can be
/// correlated back to them.
pub async fn auth_url(Extension(user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let url = services::google_calendar().auth_url(&user.id)?;

    Ok(Json(json!({ "success": true, "auth_url": url })))
}

/// POST /api/google-calendar/callback
pub async fn callback(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<CalendarCallback>,
) -> Result<Json<Value>, ApiError> {
    let tokens = services::google_calendar().exchange_code(&body.code).await?;

    Ok(Json(json!({
        "success": true,
        "access_token": tokens.access_token,
        "refresh_token": tokens.refresh_token,
        "expires_in": tokens.expires_in,
    })))
}

/// POST /api/google-calendar/event
///
/// Declared but unimplemented: without stored OAuth tokens there is nothing
/// to create events with, and the adapter says so with a 501.
pub async fn create_event(
    Extension(_user): Extension<AuthUser>,
    Json(event): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let data = services::google_calendar().create_event(&event)?;

    Ok(Json(json!({ "success": true, "data": data })))
}
