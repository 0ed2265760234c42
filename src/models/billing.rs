use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_non_empty, check_opt_len, check_pattern, check_positive, FieldErrors, Validate, EMAIL_RE,
};

/// Payment intent request. `amount` is in major currency units; the
/// adapter converts to minor units for the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

fn default_currency() -> String {
    "usd".to_string()
}

impl Validate for PaymentIntentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_positive(&mut errors, "amount", self.amount);
        check_non_empty(&mut errors, "currency", &self.currency);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for CustomerCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_pattern(&mut errors, "email", &self.email, &EMAIL_RE);
        check_opt_len(&mut errors, "name", self.name.as_deref(), 1, 200);
        errors.into_result()
    }
}

/// Processor-side invoice: a line item followed by an invoice header.
/// The two provider calls are not transactional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorInvoiceRequest {
    pub customer_id: String,
    pub amount: f64,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Validate for ProcessorInvoiceRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "customer_id", &self.customer_id);
        check_positive(&mut errors, "amount", self.amount);
        check_non_empty(&mut errors, "description", &self.description);
        errors.into_result()
    }
}
