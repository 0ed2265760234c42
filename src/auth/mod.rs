//! Identity provider integration.
//!
//! Tokens are opaque to this API: every protected request's bearer token is
//! resolved to a caller identity by the provider. Rejection, expiry, and an
//! unreachable provider are indistinguishable to the caller; all three come
//! back as the same 401.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::config;
use crate::error::ApiError;

/// Authenticated caller identity injected into protected requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Resolve a bearer token with the identity provider's user endpoint.
pub async fn resolve_token(token: &str) -> Result<AuthUser, ApiError> {
    let cfg = &config().auth;
    let (base_url, api_key) = match (cfg.base_url.as_deref(), cfg.api_key.as_deref()) {
        (Some(url), Some(key)) => (url, key),
        _ => {
            return Err(ApiError::service_unavailable(
                "Authentication service not configured",
            ))
        }
    };

    let client = reqwest::Client::builder()
        .timeout(config().http.timeout())
        .build()
        .map_err(|e| {
            tracing::error!("failed to build auth client: {}", e);
            ApiError::unauthorized("Invalid token")
        })?;

    let res = client
        .get(format!("{}/auth/v1/user", base_url.trim_end_matches('/')))
        .bearer_auth(token)
        .header("apikey", api_key)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("identity provider unreachable: {}", e);
            ApiError::unauthorized("Invalid token")
        })?;

    if res.status() != StatusCode::OK {
        return Err(ApiError::unauthorized("Invalid token"));
    }

    let user: ProviderUser = res
        .json()
        .await
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    Ok(AuthUser {
        id: user.id,
        email: user.email,
    })
}
