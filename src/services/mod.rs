//! External service adapters.
//!
//! All four adapters share the same shape: credentials come from process
//! configuration, `enabled()` is false when any credential is absent, every
//! operation checks credentials first and fails fast, then issues exactly one
//! outbound call with the configured timeout and normalizes the provider's
//! response. No retries, no batching, no caching.

pub mod error;
pub mod google_calendar;
pub mod stripe;
pub mod twilio;
pub mod vapi;

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::config::config;
use error::ServiceError;

pub(crate) fn http_client(service: &'static str, timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| ServiceError::Transport { service, source })
}

pub(crate) fn transport(service: &'static str) -> impl FnOnce(reqwest::Error) -> ServiceError {
    move |source| ServiceError::Transport { service, source }
}

/// Map a provider response to its JSON body when the status matches, or to
/// an upstream error carrying the provider's status and raw body text.
pub(crate) async fn expect_status(
    service: &'static str,
    res: Response,
    expected: StatusCode,
) -> Result<Value, ServiceError> {
    let status = res.status();
    if status != expected {
        let message = res.text().await.unwrap_or_default();
        return Err(ServiceError::Upstream { service, status: status.as_u16(), message });
    }
    res.json().await.map_err(transport(service))
}

// Adapter singletons, built once from process configuration.

static VAPI: Lazy<vapi::VapiService> =
    Lazy::new(|| vapi::VapiService::new(config().vapi.clone(), config().http.timeout()));

static TWILIO: Lazy<twilio::TwilioService> =
    Lazy::new(|| twilio::TwilioService::new(config().twilio.clone(), config().http.timeout()));

static STRIPE: Lazy<stripe::StripeService> =
    Lazy::new(|| stripe::StripeService::new(config().stripe.clone(), config().http.timeout()));

static GOOGLE_CALENDAR: Lazy<google_calendar::GoogleCalendarService> = Lazy::new(|| {
    google_calendar::GoogleCalendarService::new(config().google.clone(), config().http.timeout())
});

pub fn vapi() -> &'static vapi::VapiService {
    &VAPI
}

pub fn twilio() -> &'static twilio::TwilioService {
    &TWILIO
}

pub fn stripe() -> &'static stripe::StripeService {
    &STRIPE
}

pub fn google_calendar() -> &'static google_calendar::GoogleCalendarService {
    &GOOGLE_CALENDAR
}
