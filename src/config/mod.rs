use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

/// Process configuration, sourced from the environment once at startup.
///
/// Each provider section carries only that provider's credentials; a missing
/// credential disables the corresponding adapter without affecting anything
/// else in the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub vapi: VapiConfig,
    pub twilio: TwilioConfig,
    pub stripe: StripeConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Shared settings for outbound provider calls.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn enabled(&self) -> bool {
        self.url.is_some()
    }
}

/// Identity provider used to resolve bearer tokens into a caller identity.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl AuthConfig {
    pub fn enabled(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct VapiConfig {
    pub api_key: Option<String>,
}

impl VapiConfig {
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
}

impl TwilioConfig {
    pub fn enabled(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: Option<String>,
}

impl StripeConfig {
    pub fn enabled(&self) -> bool {
        self.secret_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

impl GoogleConfig {
    pub fn enabled(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env_parsed("PORT").unwrap_or(8000),
            },
            http: HttpConfig {
                timeout_secs: env_parsed("OUTBOUND_TIMEOUT_SECS").unwrap_or(30),
            },
            database: DatabaseConfig {
                url: env_opt("DATABASE_URL"),
                max_connections: env_parsed("DATABASE_MAX_CONNECTIONS").unwrap_or(10),
            },
            auth: AuthConfig {
                base_url: env_opt("SUPABASE_URL"),
                api_key: env_opt("SUPABASE_SERVICE_ROLE_KEY"),
            },
            vapi: VapiConfig {
                api_key: env_opt("VAPI_API_KEY"),
            },
            twilio: TwilioConfig {
                account_sid: env_opt("TWILIO_ACCOUNT_SID"),
                auth_token: env_opt("TWILIO_AUTH_TOKEN"),
                from_number: env_opt("TWILIO_PHONE_NUMBER"),
            },
            stripe: StripeConfig {
                secret_key: env_opt("STRIPE_SECRET_KEY"),
            },
            google: GoogleConfig {
                client_id: env_opt("GOOGLE_CLIENT_ID"),
                client_secret: env_opt("GOOGLE_CLIENT_SECRET"),
                redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                    .unwrap_or_else(|_| "http://localhost:3000/auth/google/callback".to_string()),
            },
        }
    }
}

/// Read an env var, treating the empty string as absent.
fn env_opt(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_sections_disabled_without_credentials() {
        let twilio = TwilioConfig {
            account_sid: Some("AC123".into()),
            auth_token: Some("token".into()),
            from_number: None,
        };
        assert!(!twilio.enabled());

        let stripe = StripeConfig { secret_key: None };
        assert!(!stripe.enabled());

        let google = GoogleConfig {
            client_id: Some("id".into()),
            client_secret: None,
            redirect_uri: "http://localhost:3000/auth/google/callback".into(),
        };
        assert!(!google.enabled());
    }

    #[test]
    fn provider_sections_enabled_with_full_credentials() {
        let twilio = TwilioConfig {
            account_sid: Some("AC123".into()),
            auth_token: Some("token".into()),
            from_number: Some("+15550006666".into()),
        };
        assert!(twilio.enabled());

        let vapi = VapiConfig {
            api_key: Some("key".into()),
        };
        assert!(vapi.enabled());
    }
}
