use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::activity;
use crate::auth::AuthUser;
use crate::database::gateway;
use crate::error::ApiError;
use crate::models::InvoiceCreate;
use crate::validation::ValidJson;

use super::utils::{record_from, record_id, stamp_created};

/// POST /api/invoices
pub async fn create(
    Extension(user): Extension<AuthUser>,
    ValidJson(body): ValidJson<InvoiceCreate>,
) -> Result<Json<Value>, ApiError> {
    let mut record = record_from(&body)?;
    // New invoices always start out pending; the caller has no say.
    record.insert("status".to_string(), Value::String("pending".to_string()));
    stamp_created(&mut record);

    let stored = gateway::insert_one("invoices", record).await?;
    let invoice_id = record_id(&stored);

    activity::record(user.id, "create", "invoice", invoice_id.clone(), body.title.clone(), None);

    Ok(Json(json!({
        "success": true,
        "invoice_id": invoice_id,
        "data": stored,
    })))
}
