use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{
    check_len, check_non_empty, check_one_of, check_opt_len, check_pattern, check_range_i64,
    FieldErrors, Validate, PHONE_RE,
};

pub const AGENT_TYPES: &[&str] = &["sales", "support", "appointment", "follow_up", "custom"];

/// Voice agent creation body. The canonical record lives with the voice
/// provider; the local row written after a successful create is a cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceAgentCreate {
    pub name: String,
    pub phone_number: String,
    pub script: String,
    pub client_id: String,
    #[serde(rename = "type", default = "default_type")]
    pub agent_type: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Seconds; one minute up to half an hour.
    #[serde(default = "default_max_duration")]
    pub max_duration: i64,
}

fn default_type() -> String {
    "sales".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_max_duration() -> i64 {
    300
}

impl Validate for VoiceAgentCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, 1, 100);
        check_pattern(&mut errors, "phone_number", &self.phone_number, &PHONE_RE);
        check_len(&mut errors, "script", &self.script, 10, 1000);
        check_non_empty(&mut errors, "client_id", &self.client_id);
        check_one_of(&mut errors, "type", &self.agent_type, AGENT_TYPES);
        check_range_i64(&mut errors, "max_duration", self.max_duration, 60, 1800);
        errors.into_result()
    }
}

/// Partial patch applied to an existing agent; absent fields are untouched
/// and stay out of the serialized patch entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceAgentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<i64>,
}

impl VoiceAgentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.script.is_none()
            && self.model.is_none()
            && self.voice.is_none()
            && self.max_duration.is_none()
    }
}

impl Validate for VoiceAgentUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_opt_len(&mut errors, "name", self.name.as_deref(), 1, 100);
        check_opt_len(&mut errors, "script", self.script.as_deref(), 10, 1000);
        if let Some(max_duration) = self.max_duration {
            check_range_i64(&mut errors, "max_duration", max_duration, 60, 1800);
        }
        errors.into_result()
    }
}

/// Body for initiating an outbound call through an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    pub phone_number: String,
}

impl Validate for CallRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_pattern(&mut errors, "phone_number", &self.phone_number, &PHONE_RE);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> VoiceAgentCreate {
        serde_json::from_value(json!({
            "name": "Outbound sales",
            "phone_number": "+15551234567",
            "script": "Hi, this is the demo desk calling about your request.",
            "client_id": "c-1"
        }))
        .expect("deserialize")
    }

    #[test]
    fn defaults_apply() {
        let agent = minimal();
        assert_eq!(agent.agent_type, "sales");
        assert_eq!(agent.model, "gpt-4");
        assert_eq!(agent.voice, "alloy");
        assert_eq!(agent.max_duration, 300);
        assert!(agent.validate().is_ok());
    }

    #[test]
    fn script_length_bounds() {
        let mut agent = minimal();
        agent.script = "too short".into();
        assert!(agent.validate().is_err());
        agent.script = "x".repeat(1001);
        assert!(agent.validate().is_err());
        agent.script = "x".repeat(1000);
        assert!(agent.validate().is_ok());
    }

    #[test]
    fn max_duration_bounds() {
        let mut agent = minimal();
        agent.max_duration = 59;
        assert!(agent.validate().is_err());
        agent.max_duration = 1801;
        assert!(agent.validate().is_err());
        agent.max_duration = 1800;
        assert!(agent.validate().is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let patch: VoiceAgentUpdate = serde_json::from_value(json!({})).expect("deserialize");
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());

        let patch: VoiceAgentUpdate =
            serde_json::from_value(json!({ "max_duration": 30 })).expect("deserialize");
        assert!(patch.validate().is_err());
    }

    #[test]
    fn call_request_validates_number() {
        let call = CallRequest { phone_number: "bogus".into() };
        assert!(call.validate().is_err());
        let call = CallRequest { phone_number: "+15557654321".into() };
        assert!(call.validate().is_ok());
    }
}
