//! # API Error Types
//!
//! Error types for requests to the inventory backend and for loading the
//! client configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Client Error Categories                         │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────────┐     │
//! │  │        ApiError         │        │        ConfigError          │     │
//! │  │                         │        │                             │     │
//! │  │  Status  (non-2xx)      │        │  InvalidUrl                 │     │
//! │  │  Network (transport)    │        │  InvalidValue               │     │
//! │  │  Timeout                │        │  LoadFailed                 │     │
//! │  │  InvalidResponse (body) │        │  SaveFailed                 │     │
//! │  └─────────────────────────┘        └─────────────────────────────┘     │
//! │                                                                         │
//! │  Only `Status` can carry a server-supplied message. Every ApiError     │
//! │  ends up as an error notification; none is retried.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for requests.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Request Errors
// =============================================================================

/// A failed request to the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        /// The `message` field of the JSON error body, when there was one.
        message: Option<String>,
    },

    /// Connection refused, reset, DNS failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The configured client timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The body could not be decoded into the expected records.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Shorthand for a status failure with a server message.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: Some(message.into()),
        }
    }

    /// The server-supplied message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns true if repeating the request could succeed.
    ///
    /// Used for log levels only; the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::InvalidResponse(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// A problem with `dashboard.toml` or its overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API base URL does not parse or is not http(s).
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// A setting has an unusable value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = ApiError::status(409, "Categoria já existe");
        assert_eq!(err.server_message(), Some("Categoria já existe"));
        assert_eq!(err.to_string(), "Request failed with status 409: Categoria já existe");

        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.server_message(), None);
        assert_eq!(bare.to_string(), "Request failed with status 500");

        assert_eq!(ApiError::Timeout.server_message(), None);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::Network("connection refused".into()).is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::status(503, "down").is_retryable());

        assert!(!ApiError::status(400, "bad").is_retryable());
        assert!(!ApiError::InvalidResponse("eof".into()).is_retryable());
    }

    #[test]
    fn test_config_error_conversions() {
        let err: ConfigError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));

        let err: ConfigError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }
}
