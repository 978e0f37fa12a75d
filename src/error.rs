//! Error types for miro-mcp.
//!
//! # Security Note
//!
//! Error messages are carefully crafted to NEVER include the access token.
//! Remote errors carry only the HTTP status and the service-provided message.

use thiserror::Error;

/// Errors that can occur while bridging an invocation to the remote service.
#[derive(Error, Debug)]
pub enum Error {
    /// An invocation was rejected before any network access: missing required
    /// argument, unknown tool or prompt name, malformed resource URI, or an
    /// out-of-bounds batch size.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of what was rejected.
        message: String,
    },

    /// The remote service answered with a non-success status.
    #[error("remote service error (HTTP {status}): {message}")]
    Remote {
        /// HTTP status code of the response.
        status: u16,
        /// Message from the service's error body, or a generic fallback.
        message: String,
    },

    /// The HTTP round trip itself failed (connection, TLS, timeout).
    #[error("transport error: {source}")]
    Transport {
        /// The underlying reqwest error.
        #[from]
        source: reqwest::Error,
    },

    /// A response body could not be decoded as JSON.
    #[error("failed to decode response body: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Errors that can occur during startup configuration.
///
/// These are the only fatal errors in the process: every per-invocation
/// failure is reported to the caller instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No access token was provided via CLI flag or environment.
    #[error("no access token configured (set MIRO_ACCESS_TOKEN or pass --token)")]
    MissingToken,

    /// A setting could not be used to build the HTTP client.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Description of the invalid setting.
        message: String,
    },
}
