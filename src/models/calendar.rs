use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{check_non_empty, FieldErrors, Validate};

/// OAuth callback body: the authorization code plus the opaque `state`
/// value that was threaded through the authorization URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCallback {
    pub code: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl Validate for CalendarCallback {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "code", &self.code);
        errors.into_result()
    }
}
