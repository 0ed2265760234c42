use thiserror::Error;

/// Errors shared by every service adapter.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required credentials are absent; the adapter is disabled.
    #[error("{0} service not configured")]
    NotConfigured(&'static str),

    /// The operation exists on the adapter surface but has no working
    /// implementation behind it.
    #[error("{service}: {message}")]
    NotImplemented {
        service: &'static str,
        message: &'static str,
    },

    /// The provider answered with a non-success status; its status code and
    /// raw body text are carried through to the caller.
    #[error("{service} returned {status}: {message}")]
    Upstream {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The call never produced a provider response (DNS, TLS, timeout...).
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
