//! Error types for the API client

use crate::content::ContentKind;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback message when an error response carries no usable `detail` field
pub(crate) const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// API client errors
///
/// Every failure path in the crate resolves to exactly one of these; no raw
/// transport or deserialization error crosses the crate boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a server response (DNS, connect, timeout)
    #[error("Network error: {message}")]
    Transport {
        /// Message from the underlying transport error
        message: String,
    },

    /// The server answered with an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body's `detail` field, or a
        /// generic fallback
        message: String,
    },

    /// A success response body did not match the expected shape
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Numeric status for caller dispatch
    ///
    /// Returns the HTTP status for server-reported failures and `0` for
    /// anything that never got a server answer, so callers can branch on a
    /// single number (e.g. `401` means re-authenticate, `0` may be worth a
    /// retry).
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Transport { .. } | Self::Decode(_) | Self::Config(_) => 0,
        }
    }

    /// Check if the request never reached the server
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an authentication failure (401)
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Extract a human-readable message from an error response body
///
/// Only JSON bodies are mined for the server's `detail` field; non-JSON
/// bodies (and JSON without a `detail` string) fall back to the generic
/// message rather than leaking raw body text.
pub(crate) fn error_message(kind: ContentKind, body: &[u8]) -> String {
    if !kind.is_json() {
        return GENERIC_ERROR_MESSAGE.to_string();
    }

    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_sentinel() {
        let transport = ApiError::transport("connection refused");
        assert_eq!(transport.status(), 0);
        assert!(transport.is_transport());

        let api = ApiError::api_response(401, "Incorrect email or password");
        assert_eq!(api.status(), 401);
        assert!(!api.is_transport());
    }

    #[test]
    fn test_error_classification() {
        let unauthorized = ApiError::api_response(401, "nope");
        assert!(unauthorized.is_auth_error());
        assert!(unauthorized.is_client_error());
        assert!(!unauthorized.is_server_error());

        let not_found = ApiError::api_response(404, "Product not found");
        assert!(!not_found.is_auth_error());
        assert!(not_found.is_client_error());

        let internal = ApiError::api_response(500, "boom");
        assert!(internal.is_server_error());
        assert!(!internal.is_client_error());
    }

    #[test]
    fn test_error_message_from_detail() {
        let body = br#"{"detail": "Invalid credentials"}"#;
        assert_eq!(
            error_message(ContentKind::Json, body),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_error_message_json_without_detail() {
        let body = br#"{"error": "Invalid credentials"}"#;
        assert_eq!(error_message(ContentKind::Json, body), GENERIC_ERROR_MESSAGE);

        // A detail field that is not a string is ignored too
        let body = br#"{"detail": {"code": 42}}"#;
        assert_eq!(error_message(ContentKind::Json, body), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_message_non_json_never_leaks_body() {
        let body = b"<html><body>Internal Server Error</body></html>";
        assert_eq!(error_message(ContentKind::Text, body), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            error_message(ContentKind::Binary, body),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_display_formats() {
        let err = ApiError::api_response(404, "Product not found");
        assert_eq!(err.to_string(), "API error (404): Product not found");

        let err = ApiError::transport("dns error");
        assert_eq!(err.to_string(), "Network error: dns error");
    }
}
