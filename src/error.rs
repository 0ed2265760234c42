// HTTP API Error Types
use std::collections::HashMap;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-facing messages.
///
/// Every raised condition in the request pipeline converges here and is
/// rendered as the uniform `{"error": <message>, "status_code": <code>}`
/// envelope, regardless of where it originated.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 501 Not Implemented
    NotImplemented(String),

    // 503 Service Unavailable (missing credentials or datastore config)
    ServiceUnavailable(String),

    // Provider returned a non-success status; its status and raw body
    // are forwarded to the caller as-is.
    Upstream { status: u16, message: String },

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Validation { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotImplemented(_) => 501,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-facing error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Validation { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotImplemented(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message(),
            "status_code": self.status_code(),
        });

        if let ApiError::Validation { field_errors, .. } = self {
            if !field_errors.is_empty() {
                body["field_errors"] = json!(field_errors);
            }
        }

        body
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ApiError::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        ApiError::NotImplemented(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert component error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        use crate::database::manager::DatabaseError;
        match err {
            DatabaseError::NotConfigured => {
                ApiError::service_unavailable("Database not configured")
            }
            DatabaseError::InvalidCollection(name) => {
                tracing::error!("invalid collection name reached the gateway: {}", name);
                ApiError::internal("An error occurred while processing your request")
            }
            DatabaseError::UnexpectedRow(collection) => {
                tracing::error!("unexpected row shape from collection {}", collection);
                ApiError::internal("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(e) => {
                tracing::error!("database error: {}", e);
                ApiError::internal(e.to_string())
            }
        }
    }
}

impl From<crate::services::error::ServiceError> for ApiError {
    fn from(err: crate::services::error::ServiceError) -> Self {
        use crate::services::error::ServiceError;
        match err {
            ServiceError::NotConfigured(service) => {
                ApiError::service_unavailable(format!("{} service not configured", service))
            }
            ServiceError::NotImplemented { service, message } => {
                ApiError::not_implemented(format!("{}: {}", service, message))
            }
            ServiceError::Upstream { status, message, .. } => {
                // Forward the provider's status when it is a valid HTTP code
                let status = if StatusCode::from_u16(status).is_ok() { status } else { 502 };
                ApiError::Upstream { status, message }
            }
            ServiceError::Transport { service, source } => {
                tracing::error!("{} transport failure: {}", service, source);
                ApiError::internal(format!("{} service error: {}", service, source))
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_error_and_status_code() {
        let err = ApiError::unauthorized("Invalid token");
        let body = err.to_json();
        assert_eq!(body["error"], "Invalid token");
        assert_eq!(body["status_code"], 401);
        assert!(body.get("field_errors").is_none());
    }

    #[test]
    fn validation_envelope_carries_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("budget".to_string(), "must be greater than 0".to_string());
        let err = ApiError::validation_error("Request validation failed", fields);
        let body = err.to_json();
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["field_errors"]["budget"], "must be greater than 0");
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let err = ApiError::Upstream {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_json()["status_code"], 429);
    }
}
