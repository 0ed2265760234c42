use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_len, check_non_empty, check_opt_len, check_positive, check_range_f64, FieldErrors,
    Validate,
};

/// Invoice creation body. `status` is not accepted from the caller; the
/// route sets it to "pending" at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub client_id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub tax_rate: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for InvoiceCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "client_id", &self.client_id);
        check_len(&mut errors, "title", &self.title, 1, 200);
        check_opt_len(&mut errors, "description", self.description.as_deref(), 0, 1000);
        check_positive(&mut errors, "amount", self.amount);
        check_range_f64(&mut errors, "tax_rate", self.tax_rate, 0.0, 1.0);
        check_opt_len(&mut errors, "notes", self.notes.as_deref(), 0, 1000);
        errors.into_result()
    }
}
