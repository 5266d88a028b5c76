//! # Relay Error Types
//!
//! Typed error handling for the checkout relay.
//! Every call across the provider boundary returns `Result<T, RelayError>`.
//!
//! The `Display` output of each variant is the failure's description exactly
//! as the provider reported it, so handlers can relay it to the caller
//! without rewording.

use thiserror::Error;

/// Failure of a call to the remote payment provider
#[derive(Debug, Error)]
pub enum RelayError {
    /// The provider rejected the request (authentication, validation, ...)
    #[error("{message}")]
    Api {
        /// HTTP status returned by the provider, when there was a response
        status: Option<u16>,
        /// Provider error code (e.g. `resource_missing`)
        code: Option<String>,
        message: String,
    },

    /// Network/HTTP error communicating with the provider
    #[error("{0}")]
    Network(String),

    /// Webhook signature could not be verified
    #[error("{0}")]
    SignatureVerification(String),

    /// Malformed webhook payload or provider response
    #[error("{0}")]
    Parse(String),

    /// Invalid startup configuration (missing keys, bad key format)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RelayError {
    /// Provider rejection carrying only a message
    pub fn api(message: impl Into<String>) -> Self {
        RelayError::Api {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code the relay answers with for this error.
    ///
    /// Every remote-call failure is surfaced as `400`; only a broken local
    /// configuration is a server error.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Api { .. }
            | RelayError::Network(_)
            | RelayError::SignatureVerification(_)
            | RelayError::Parse(_) => 400,
            RelayError::Configuration(_) => 500,
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
