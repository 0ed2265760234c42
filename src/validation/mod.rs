//! Declarative per-field request validation.
//!
//! Each request model implements [`Validate`] using the rule helpers below;
//! any violation rejects the whole body before a handler runs, via the
//! [`ValidJson`] extractor. Rules are pattern, length bounds, numeric range,
//! or closed-set membership - nothing is coerced or sanitized.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern"));

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Accumulates field/reason pairs; all violations in a body are reported
/// together rather than one at a time.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Request validation failed", self.errors))
        }
    }
}

pub fn check_len(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(field, format!("length must be between {} and {}", min, max));
    }
}

pub fn check_opt_len(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Some(value) = value {
        check_len(errors, field, value, min, max);
    }
}

pub fn check_non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(field, "must not be empty");
    }
}

pub fn check_pattern(errors: &mut FieldErrors, field: &str, value: &str, pattern: &Regex) {
    if !pattern.is_match(value) {
        errors.push(field, "invalid format");
    }
}

pub fn check_one_of(errors: &mut FieldErrors, field: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.push(field, format!("must be one of: {}", allowed.join(", ")));
    }
}

pub fn check_range_i64(errors: &mut FieldErrors, field: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        errors.push(field, format!("must be between {} and {}", min, max));
    }
}

pub fn check_range_f64(errors: &mut FieldErrors, field: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(field, format!("must be between {} and {}", min, max));
    }
}

pub fn check_positive(errors: &mut FieldErrors, field: &str, value: f64) {
    if !(value > 0.0) {
        errors.push(field, "must be greater than 0");
    }
}

/// JSON body extractor that runs validation before the handler body.
///
/// Deserialization failures become a 400 envelope; constraint violations
/// become a 400 envelope with the field/reason map. Either way the handler
/// never observes a bad body, so no side effect can precede rejection.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        body.validate()?;
        Ok(ValidJson(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(EMAIL_RE.is_match("a@b.com"));
        assert!(EMAIL_RE.is_match("first.last@sub.example.org"));
        assert!(!EMAIL_RE.is_match("not-an-email"));
        assert!(!EMAIL_RE.is_match("missing@tld"));
        assert!(!EMAIL_RE.is_match("two@@b.com"));
    }

    #[test]
    fn phone_pattern() {
        assert!(PHONE_RE.is_match("+15551234567"));
        assert!(PHONE_RE.is_match("5551234567"));
        assert!(PHONE_RE.is_match("15551234567"));
        assert!(!PHONE_RE.is_match("12345"));
        assert!(!PHONE_RE.is_match("555-123-4567"));
        assert!(!PHONE_RE.is_match("+1555123456789012345"));
    }

    #[test]
    fn collects_all_violations() {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", "", 1, 100);
        check_positive(&mut errors, "budget", -5.0);
        check_one_of(&mut errors, "status", "zombie", &["lead", "active"]);

        let err = errors.into_result().unwrap_err();
        match err {
            ApiError::Validation { field_errors, .. } => {
                assert_eq!(field_errors.len(), 3);
                assert!(field_errors.contains_key("name"));
                assert!(field_errors.contains_key("budget"));
                assert!(field_errors.contains_key("status"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut errors = FieldErrors::new();
        check_range_i64(&mut errors, "duration", 15, 15, 480);
        check_range_i64(&mut errors, "duration2", 480, 15, 480);
        check_range_f64(&mut errors, "tax_rate", 0.0, 0.0, 1.0);
        check_range_f64(&mut errors, "tax_rate2", 1.0, 0.0, 1.0);
        assert!(errors.is_empty());

        check_range_i64(&mut errors, "duration", 14, 15, 480);
        assert!(!errors.is_empty());
    }
}
