use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway;
use crate::error::ApiError;
use crate::models::PaymentCreate;
use crate::validation::ValidJson;

use super::utils::{record_from, record_id, stamp_created};

/// POST /api/payments
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<PaymentCreate>,
) -> Result<Json<Value>, ApiError> {
    let mut record = record_from(&body)?;
    // Recorded payments are settled money; they are born completed.
    record.insert("status".to_string(), Value::String("completed".to_string()));
    stamp_created(&mut record);

    let stored = gateway::insert_one("payments", record).await?;
    let payment_id = record_id(&stored);

    activity::record(
        user.id,
        "create",
        "payment",
        payment_id.clone(),
        format!("Payment of ${:.2}", body.amount),
        None,
    );

    Ok(Json(json!({
        "success": true,
        "payment_id": payment_id,
        "data": stored,
    })))
}
