use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{check_len, check_pattern, FieldErrors, Validate, PHONE_RE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsSendRequest {
    pub to: String,
    pub message: String,
}

impl Validate for SmsSendRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_pattern(&mut errors, "to", &self.to, &PHONE_RE);
        check_len(&mut errors, "message", &self.message, 1, 1600);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_destination_and_empty_body() {
        let sms = SmsSendRequest { to: "abc".into(), message: String::new() };
        let err = sms.validate().unwrap_err();
        match err {
            ApiError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("to"));
                assert!(field_errors.contains_key("message"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_message() {
        let sms = SmsSendRequest { to: "+15551234567".into(), message: "On our way".into() };
        assert!(sms.validate().is_ok());
    }
}
