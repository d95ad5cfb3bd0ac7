//! Error types for provider adapters.
//!
//! Every adapter failure is expressed as a [`FetchError`] carrying the
//! provider id, so callers can log which source degraded a record.
//!
//! An empty result is NOT an error: adapters return `Ok(None)` or an empty
//! vec for a valid negative, and reserve `FetchError` for transport,
//! timeout and decoding failures.

use thiserror::Error;

/// Errors that can occur while querying an external data provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request exceeded the adapter's bounded timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// Transport-level failure: connection refused, non-success status,
    /// provider-reported error body.
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider that returned the error
        provider: String,
        /// What went wrong
        message: String,
    },

    /// The provider answered but the payload could not be decoded.
    #[error("Parse error: {provider} - {message}")]
    Parse {
        /// The provider whose payload failed to decode
        provider: String,
        /// The decoding failure
        message: String,
    },

    /// A network error surfaced directly from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    /// Classify a reqwest send error into timeout vs transport.
    pub(crate) fn from_send_error(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            FetchError::Transport {
                provider: provider.to_string(),
                message: format!("Request failed: {}", err),
            }
        }
    }

    /// True when the failure was the bounded timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
