//! Error types for the EcoMap client.
//!
//! A single error type with explicit variants for transport, authentication,
//! API, storage and input validation failures.

use std::fmt;
use thiserror::Error;

/// The `detail` value the backend uses for a revoked access token.
pub const BLACKLISTED_DETAIL: &str = "Token is blacklisted";

/// The unified error type for EcoMap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session-level authentication failures (no refresh token, refresh rejected).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The API answered with a non-success status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Credential storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (URLs, times).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A response or stored document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the API rejected the request's authentication.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_auth_rejected())
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Auth(AuthError::RefreshFailed { status, .. }) => *status,
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication errors that end the local session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh token is stored; nothing to refresh with.
    #[error("no refresh token")]
    NoRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("token refresh failed{}", fmt_refresh_failure(.status, .detail))]
    RefreshFailed {
        status: Option<u16>,
        detail: Option<String>,
    },
}

fn fmt_refresh_failure(status: &Option<u16>, detail: &Option<String>) -> String {
    match (status, detail) {
        (Some(status), Some(detail)) => format!(" (HTTP {status}): {detail}"),
        (Some(status), None) => format!(" (HTTP {status})"),
        (None, Some(detail)) => format!(": {detail}"),
        (None, None) => String::new(),
    }
}

/// A non-success response from the API.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// The `detail` field of the error body, if present.
    pub detail: Option<String>,
    /// The `code` field of the error body, if present.
    pub code: Option<String>,
    /// The raw response body.
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, detail: Option<String>, code: Option<String>, body: String) -> Self {
        Self {
            status,
            detail,
            code,
            body,
        }
    }

    /// Check if the server rejected the request's credentials.
    pub fn is_auth_rejected(&self) -> bool {
        self.status == 401 || self.detail.as_deref() == Some(BLACKLISTED_DETAIL)
    }
}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored document is unreadable.
    #[error("corrupt credential file {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid or incomplete time of day.
    #[error("invalid time '{value}' for {day}: {reason}")]
    Time {
        value: String,
        day: String,
        reason: String,
    },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_is_auth_rejection() {
        let err = ApiError::new(401, None, None, String::new());
        assert!(err.is_auth_rejected());
    }

    #[test]
    fn blacklisted_detail_is_auth_rejection() {
        let err = ApiError::new(
            400,
            Some(BLACKLISTED_DETAIL.to_string()),
            None,
            String::new(),
        );
        assert!(err.is_auth_rejected());
        assert!(Error::Api(err).is_auth_rejected());
    }

    #[test]
    fn other_failures_are_not_auth_rejections() {
        let err = ApiError::new(403, Some("Forbidden".into()), None, String::new());
        assert!(!err.is_auth_rejected());
        assert_eq!(Error::Api(err).status(), Some(403));
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::new(
            401,
            Some("Given token not valid".into()),
            Some("token_not_valid".into()),
            String::new(),
        );
        assert_eq!(
            err.to_string(),
            "HTTP 401 [token_not_valid]: Given token not valid"
        );
    }

    #[test]
    fn refresh_failed_display() {
        let err = AuthError::RefreshFailed {
            status: Some(401),
            detail: Some("Token is invalid or expired".into()),
        };
        assert_eq!(
            err.to_string(),
            "token refresh failed (HTTP 401): Token is invalid or expired"
        );
        assert_eq!(AuthError::NoRefreshToken.to_string(), "no refresh token");
    }
}
