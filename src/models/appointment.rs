use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_non_empty, check_one_of, check_opt_len, check_range_i64, FieldErrors, Validate,
};

pub const APPOINTMENT_TYPES: &[&str] = &["demo", "call", "follow_up", "meeting", "consultation"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub client_id: String,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes; bounded to a quarter hour up to a full working day.
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_duration() -> i64 {
    60
}

impl AppointmentCreate {
    /// Display name used for the audit trail when no title was given.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => format!("{} appointment", self.appointment_type),
        }
    }
}

impl Validate for AppointmentCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_non_empty(&mut errors, "client_id", &self.client_id);
        check_one_of(&mut errors, "type", &self.appointment_type, APPOINTMENT_TYPES);
        check_opt_len(&mut errors, "title", self.title.as_deref(), 0, 200);
        check_opt_len(&mut errors, "description", self.description.as_deref(), 0, 1000);
        check_range_i64(&mut errors, "duration", self.duration, 15, 480);
        check_opt_len(&mut errors, "location", self.location.as_deref(), 0, 200);
        check_opt_len(&mut errors, "notes", self.notes.as_deref(), 0, 1000);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> AppointmentCreate {
        serde_json::from_value(json!({
            "client_id": "c-1",
            "date_time": "2025-06-01T15:00:00Z",
            "type": "demo"
        }))
        .expect("deserialize")
    }

    #[test]
    fn defaults_and_display_name() {
        let appt = minimal();
        assert_eq!(appt.duration, 60);
        assert_eq!(appt.display_name(), "demo appointment");
        assert!(appt.validate().is_ok());
    }

    #[test]
    fn title_wins_for_display_name() {
        let mut appt = minimal();
        appt.title = Some("Kickoff".into());
        assert_eq!(appt.display_name(), "Kickoff");
    }

    #[test]
    fn duration_bounds() {
        let mut appt = minimal();
        appt.duration = 14;
        assert!(appt.validate().is_err());
        appt.duration = 481;
        assert!(appt.validate().is_err());
        appt.duration = 480;
        assert!(appt.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_type() {
        let mut appt = minimal();
        appt.appointment_type = "webinar".into();
        assert!(appt.validate().is_err());
    }
}
