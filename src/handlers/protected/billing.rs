use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{CustomerCreate, PaymentIntentRequest, ProcessorInvoiceRequest};
use crate::services;
use crate::validation::ValidJson;

/// POST /api/stripe/payment-intent
pub async fn payment_intent(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<PaymentIntentRequest>,
) -> Result<Json<Value>, ApiError> {
    let intent = services::stripe().create_payment_intent(&body).await?;

    Ok(Json(json!({
        "success": true,
        "client_secret": intent.client_secret,
        "id": intent.id,
    })))
}

/// POST /api/stripe/customer
pub async fn customer(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<CustomerCreate>,
) -> Result<Json<Value>, ApiError> {
    let created = services::stripe().create_customer(&body).await?;

    Ok(Json(json!({
        "success": true,
        "customer_id": created.id,
        "data": created.data,
    })))
}

/// POST /api/stripe/invoice
pub async fn invoice(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<ProcessorInvoiceRequest>,
) -> Result<Json<Value>, ApiError> {
    let created = services::stripe().create_invoice(&body).await?;

    Ok(Json(json!({
        "success": true,
        "invoice_id": created.id,
        "data": created.data,
    })))
}
