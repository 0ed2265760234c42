use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_non_empty, check_one_of, check_opt_len, check_positive, FieldErrors, Validate,
};

pub const PAYMENT_METHODS: &[&str] = &["stripe", "check", "cash", "bank_transfer"];

/// Payment creation body. `status` is set to "completed" by the route.
/// There is no link-back validation that the invoice exists or that the
/// amount reconciles against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub invoice_id: String,
    pub amount: f64,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for PaymentCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "invoice_id", &self.invoice_id);
        check_positive(&mut errors, "amount", self.amount);
        check_one_of(&mut errors, "payment_method", &self.payment_method, PAYMENT_METHODS);
        check_opt_len(&mut errors, "reference_number", self.reference_number.as_deref(), 0, 100);
        check_opt_len(&mut errors, "notes", self.notes.as_deref(), 0, 500);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> PaymentCreate {
        serde_json::from_value(json!({
            "invoice_id": "inv-1",
            "amount": 350.0,
            "payment_method": "check",
            "payment_date": "2025-06-15T00:00:00Z"
        }))
        .expect("deserialize")
    }

    #[test]
    fn valid_payment_passes() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn rejects_unknown_method() {
        let mut payment = minimal();
        payment.payment_method = "barter".into();
        let err = payment.validate().unwrap_err();
        match err {
            ApiError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("payment_method"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_amount() {
        let mut payment = minimal();
        payment.amount = 0.0;
        assert!(payment.validate().is_err());
    }
}
