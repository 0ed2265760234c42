use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_len, check_one_of, check_opt_len, check_pattern, FieldErrors, Validate, EMAIL_RE,
    PHONE_RE,
};

pub const CLIENT_STATUSES: &[&str] = &["lead", "prospect", "active", "churned"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub bilingual_preference: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "lead".to_string()
}

impl Validate for ClientCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, 1, 100);
        check_pattern(&mut errors, "email", &self.email, &EMAIL_RE);
        check_pattern(&mut errors, "phone", &self.phone, &PHONE_RE);
        check_len(&mut errors, "address", &self.address, 1, 200);
        check_one_of(&mut errors, "status", &self.status, CLIENT_STATUSES);
        check_opt_len(&mut errors, "notes", self.notes.as_deref(), 0, 1000);
        errors.into_result()
    }
}
