//! Calendar provider adapter: OAuth URL construction and code exchange.
//!
//! Event creation is a declared-but-unimplemented operation: making it real
//! requires storing and retrieving per-user OAuth tokens, which this system
//! does not do. It reports 501 rather than pretending to succeed.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

use super::error::ServiceError;
use super::{expect_status, http_client, transport};
use crate::config::GoogleConfig;

const SERVICE: &str = "Google Calendar";
const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

pub struct GoogleCalendarService {
    config: GoogleConfig,
    token_endpoint: String,
    timeout: Duration,
}

impl GoogleCalendarService {
    pub fn new(config: GoogleConfig, timeout: Duration) -> Self {
        Self {
            config,
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            timeout,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    fn credentials(&self) -> Result<(&str, &str), ServiceError> {
        match (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        ) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(ServiceError::NotConfigured(SERVICE)),
        }
    }

    /// Build the provider's authorization URL. `state` is an opaque caller
    /// correlation value echoed back on the callback; no outbound call.
    pub fn auth_url(&self, state: &str) -> Result<String, ServiceError> {
        let (client_id, _) = self.credentials()?;

        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", CALENDAR_SCOPE)
            .append_pair("response_type", "code")
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state)
            .finish();

        Ok(format!("{}?{}", AUTH_ENDPOINT, query))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ServiceError> {
        let (client_id, client_secret) = self.credentials()?;

        let res = http_client(SERVICE, self.timeout)?
            .post(&self.token_endpoint)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(transport(SERVICE))?;

        let data = expect_status(SERVICE, res, StatusCode::OK).await?;
        serde_json::from_value(data).map_err(|e| ServiceError::Upstream {
            service: SERVICE,
            status: 502,
            message: format!("unexpected token response: {}", e),
        })
    }

    /// Declared adapter operation with no working implementation behind it.
    pub fn create_event(&self, _event: &Value) -> Result<Value, ServiceError> {
        self.credentials()?;
        Err(ServiceError::NotImplemented {
            service: SERVICE,
            message: "event creation requires stored OAuth tokens, which are not persisted",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> GoogleCalendarService {
        GoogleCalendarService::new(
            GoogleConfig {
                client_id: Some("client-123".into()),
                client_secret: Some("secret".into()),
                redirect_uri: "http://localhost:3000/auth/google/callback".into(),
            },
            Duration::from_secs(5),
        )
    }

    fn disabled() -> GoogleCalendarService {
        GoogleCalendarService::new(
            GoogleConfig {
                client_id: None,
                client_secret: None,
                redirect_uri: "http://localhost:3000/auth/google/callback".into(),
            },
            Duration::from_secs(5),
        )
    }

    #[test]
    fn auth_url_carries_oauth_params() {
        let url = configured().auth_url("user-42").expect("auth url");
        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("state=user-42"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fcallback"));
    }

    #[test]
    fn auth_url_fails_fast_when_disabled() {
        let err = disabled().auth_url("user-42").unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("Google Calendar")));
    }

    #[test]
    fn event_creation_is_explicitly_unimplemented() {
        let err = configured()
            .create_event(&serde_json::json!({ "summary": "Demo" }))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotImplemented { .. }));

        // Disabled wins over unimplemented: the enabled check runs first.
        let err = disabled()
            .create_event(&serde_json::json!({ "summary": "Demo" }))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
    }
}
