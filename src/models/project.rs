use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_len, check_non_empty, check_one_of, check_opt_len, check_positive, FieldErrors, Validate,
};

pub const PROJECT_STATUSES: &[&str] =
    &["planning", "in_progress", "on_hold", "completed", "cancelled"];
pub const PROJECT_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub client_id: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub budget: f64,
    pub timeline: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "planning".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "client_id", &self.client_id);
        check_len(&mut errors, "name", &self.name, 1, 100);
        check_len(&mut errors, "description", &self.description, 1, 1000);
        check_one_of(&mut errors, "status", &self.status, PROJECT_STATUSES);
        check_one_of(&mut errors, "priority", &self.priority, PROJECT_PRIORITIES);
        check_positive(&mut errors, "budget", self.budget);
        check_len(&mut errors, "timeline", &self.timeline, 1, 100);
        check_opt_len(&mut errors, "notes", self.notes.as_deref(), 0, 1000);
        errors.into_result()
    }
}
