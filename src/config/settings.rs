//! Validated runtime settings.
//!
//! The configuration is resolved once at startup and stays immutable for the
//! process lifetime; it is passed by reference into the client and server.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default base URL of the Miro REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.miro.com/v2";

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token used on every upstream request.
    pub access_token: String,

    /// Base URL of the remote service, without a trailing slash.
    pub base_url: String,

    /// Optional path to the static prompt body on disk.
    pub prompt_file: Option<PathBuf>,
}

impl Config {
    /// Builds a validated configuration from resolved CLI/environment values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when no token was supplied, or
    /// [`ConfigError::Invalid`] for an unusable base URL.
    pub fn resolve(
        access_token: Option<String>,
        base_url: String,
        prompt_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let access_token = match access_token {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Err(ConfigError::MissingToken),
        };

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                message: format!("base URL must be http(s), got '{base_url}'"),
            });
        }

        Ok(Self {
            access_token,
            base_url,
            prompt_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_with_token() {
        let cfg = Config::resolve(
            Some("tok-123".to_string()),
            DEFAULT_BASE_URL.to_string(),
            None,
        )
        .unwrap();
        assert_eq!(cfg.access_token, "tok-123");
        assert_eq!(cfg.base_url, "https://api.miro.com/v2");
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::resolve(None, DEFAULT_BASE_URL.to_string(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn blank_token_is_fatal() {
        let err =
            Config::resolve(Some("   ".to_string()), DEFAULT_BASE_URL.to_string(), None)
                .unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = Config::resolve(
            Some("tok".to_string()),
            "https://example.test/v2/".to_string(),
            None,
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://example.test/v2");
    }

    #[test]
    fn non_http_base_url_rejected() {
        let err = Config::resolve(
            Some("tok".to_string()),
            "ftp://example.test".to_string(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
