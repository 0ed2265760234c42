//! Voice-agent platform adapter.
//!
//! Write operations (create/update/delete/call) fail loud when the adapter
//! is disabled or the provider errors; the call-log read path degrades to an
//! empty list instead. That asymmetry is deliberate and relied upon by the
//! routes.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::warn;

use super::error::ServiceError;
use super::{expect_status, http_client, transport};
use crate::config::VapiConfig;
use crate::models::{VoiceAgentCreate, VoiceAgentUpdate};

const SERVICE: &str = "VAPI";
const BASE_URL: &str = "https://api.vapi.ai";

pub const DEFAULT_LOG_LIMIT: u32 = 50;

#[derive(Debug)]
pub struct CreatedAssistant {
    /// Provider-side assistant id; the local record stores it as the cache key.
    pub id: String,
    pub data: Value,
}

pub struct VapiService {
    config: VapiConfig,
    base_url: String,
    timeout: Duration,
}

impl VapiService {
    pub fn new(config: VapiConfig, timeout: Duration) -> Self {
        Self {
            config,
            base_url: BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    fn api_key(&self) -> Result<&str, ServiceError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured(SERVICE))
    }

    pub async fn create_assistant(
        &self,
        agent: &VoiceAgentCreate,
    ) -> Result<CreatedAssistant, ServiceError> {
        let key = self.api_key()?;

        let res = http_client(SERVICE, self.timeout)?
            .post(format!("{}/assistant", self.base_url))
            .bearer_auth(key)
            .json(&assistant_payload(agent))
            .send()
            .await
            .map_err(transport(SERVICE))?;

        let data = expect_status(SERVICE, res, StatusCode::CREATED).await?;
        let id = data
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(CreatedAssistant { id, data })
    }

    pub async fn update_assistant(
        &self,
        assistant_id: &str,
        patch: &VoiceAgentUpdate,
    ) -> Result<Value, ServiceError> {
        let key = self.api_key()?;

        let res = http_client(SERVICE, self.timeout)?
            .patch(format!("{}/assistant/{}", self.base_url, assistant_id))
            .bearer_auth(key)
            .json(patch)
            .send()
            .await
            .map_err(transport(SERVICE))?;

        expect_status(SERVICE, res, StatusCode::OK).await
    }

    pub async fn delete_assistant(&self, assistant_id: &str) -> Result<(), ServiceError> {
        let key = self.api_key()?;

        let res = http_client(SERVICE, self.timeout)?
            .delete(format!("{}/assistant/{}", self.base_url, assistant_id))
            .bearer_auth(key)
            .send()
            .await
            .map_err(transport(SERVICE))?;

        let status = res.status();
        if status != StatusCode::OK {
            let message = res.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    /// Call logs for one assistant. Returns an empty list when the adapter
    /// is disabled or on any failure; this read path never errors.
    pub async fn call_logs(&self, assistant_id: &str, limit: u32) -> Vec<Value> {
        let key = match self.api_key() {
            Ok(key) => key,
            Err(_) => return Vec::new(),
        };

        let client = match http_client(SERVICE, self.timeout) {
            Ok(client) => client,
            Err(e) => {
                warn!("call log fetch skipped: {}", e);
                return Vec::new();
            }
        };

        let limit = limit.to_string();
        let res = client
            .get(format!("{}/call", self.base_url))
            .bearer_auth(key)
            .query(&[("assistantId", assistant_id), ("limit", limit.as_str())])
            .send()
            .await;

        match res {
            Ok(res) if res.status() == StatusCode::OK => match res.json::<Value>().await {
                Ok(body) => body
                    .get("data")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                Err(e) => {
                    warn!("call log body unreadable: {}", e);
                    Vec::new()
                }
            },
            Ok(res) => {
                warn!("call log fetch returned {}", res.status());
                Vec::new()
            }
            Err(e) => {
                warn!("call log fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn start_call(
        &self,
        assistant_id: &str,
        phone_number: &str,
    ) -> Result<Value, ServiceError> {
        let key = self.api_key()?;

        let res = http_client(SERVICE, self.timeout)?
            .post(format!("{}/call", self.base_url))
            .bearer_auth(key)
            .json(&json!({
                "assistantId": assistant_id,
                "customer": { "number": phone_number }
            }))
            .send()
            .await
            .map_err(transport(SERVICE))?;

        expect_status(SERVICE, res, StatusCode::CREATED).await
    }
}

/// Translate a creation request into the provider's assistant shape.
fn assistant_payload(agent: &VoiceAgentCreate) -> Value {
    json!({
        "name": agent.name,
        "model": {
            "provider": "openai",
            "model": agent.model,
            "voice": agent.voice,
            "maxDurationSeconds": agent.max_duration
        },
        "voice": {
            "provider": "elevenlabs",
            "voiceId": "21m00Tcm4TlvDq8ikWAM"
        },
        "firstMessage": agent.script,
        "systemMessage": format!("You are a professional {} assistant.", agent.agent_type),
        "phoneNumberId": agent.phone_number
    })
}
