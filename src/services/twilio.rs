//! SMS/telephony adapter.
//!
//! Sending fails loud; the owned-number listing degrades to an empty list on
//! any failure, matching the dashboard's read-path behavior.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use super::error::ServiceError;
use super::{expect_status, http_client, transport};
use crate::config::TwilioConfig;

const SERVICE: &str = "Twilio";
const BASE_URL: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioService {
    config: TwilioConfig,
    base_url: String,
    timeout: Duration,
}

struct Credentials<'a> {
    account_sid: &'a str,
    auth_token: &'a str,
    from_number: &'a str,
}

impl TwilioService {
    pub fn new(config: TwilioConfig, timeout: Duration) -> Self {
        Self {
            config,
            base_url: BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    fn credentials(&self) -> Result<Credentials<'_>, ServiceError> {
        match (
            self.config.account_sid.as_deref(),
            self.config.auth_token.as_deref(),
            self.config.from_number.as_deref(),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Ok(Credentials {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => Err(ServiceError::NotConfigured(SERVICE)),
        }
    }

    pub async fn send_message(&self, to: &str, body: &str) -> Result<Value, ServiceError> {
        let creds = self.credentials()?;

        let res = http_client(SERVICE, self.timeout)?
            .post(format!(
                "{}/Accounts/{}/Messages.json",
                self.base_url, creds.account_sid
            ))
            .basic_auth(creds.account_sid, Some(creds.auth_token))
            .form(&[("To", to), ("From", creds.from_number), ("Body", body)])
            .send()
            .await
            .map_err(transport(SERVICE))?;

        expect_status(SERVICE, res, StatusCode::CREATED).await
    }

    /// Owned phone numbers. Empty on any failure; this read path never errors.
    pub async fn list_phone_numbers(&self) -> Vec<Value> {
        let creds = match self.credentials() {
            Ok(creds) => creds,
            Err(_) => return Vec::new(),
        };

        let client = match http_client(SERVICE, self.timeout) {
            Ok(client) => client,
            Err(e) => {
                warn!("phone number listing skipped: {}", e);
                return Vec::new();
            }
        };

        let res = client
            .get(format!(
                "{}/Accounts/{}/IncomingPhoneNumbers.json",
                self.base_url, creds.account_sid
            ))
            .basic_auth(creds.account_sid, Some(creds.auth_token))
            .send()
            .await;

        match res {
            Ok(res) if res.status() == StatusCode::OK => match res.json::<Value>().await {
                Ok(body) => body
                    .get("incoming_phone_numbers")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                Err(e) => {
                    warn!("phone number body unreadable: {}", e);
                    Vec::new()
                }
            },
            Ok(res) => {
                warn!("phone number listing returned {}", res.status());
                Vec::new()
            }
            Err(e) => {
                warn!("phone number listing failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled() -> TwilioService {
        TwilioService::new(
            TwilioConfig {
                account_sid: None,
                auth_token: None,
                from_number: None,
            },
            Duration::from_secs(5),
        )
    }

    fn partially_configured() -> TwilioService {
        TwilioService::new(
            TwilioConfig {
                account_sid: Some("AC123".into()),
                auth_token: Some("token".into()),
                from_number: None,
            },
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn send_fails_fast_when_disabled() {
        let err = disabled().send_message("+15551234567", "hello").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("Twilio")));
    }

    #[tokio::test]
    async fn send_fails_fast_without_sender_number() {
        let err = partially_configured()
            .send_message("+15551234567", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("Twilio")));
    }

    #[tokio::test]
    async fn listing_degrades_to_empty_when_disabled() {
        assert!(disabled().list_phone_numbers().await.is_empty());
        assert!(partially_configured().list_phone_numbers().await.is_empty());
    }
}
