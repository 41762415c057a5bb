//! Authentication endpoints
//!
//! The login route is an OAuth2 password-grant endpoint: credentials go out
//! as a URL-encoded form under `username`/`password`, never as JSON. The
//! returned token is not applied automatically — callers decide when to
//! hand it to [`SnaplookClient::set_auth_token`].

use crate::client::SnaplookClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: SnaplookClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: SnaplookClient) -> Self {
        Self { client }
    }

    /// Log in and obtain a session token
    ///
    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserSession> {
        let form = [("username", email), ("password", password)];
        self.client.post_form("auth/login", &form).await
    }

    /// Register a new user
    ///
    /// POST /auth/register
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("auth/register", &body).await
    }

    /// Fetch the authenticated user's profile
    ///
    /// GET /auth/me — requires a bearer token; the server answers 401
    /// otherwise, surfaced as `ApiError::Api { status: 401, .. }`.
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.client.get("auth/me").await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address to register
    pub email: String,
    /// Plaintext password; hashing happens server-side
    pub password: String,
}

/// Session returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Token scheme, `"bearer"` in practice
    pub token_type: String,
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned user ID
    pub id: i64,
    /// Account email
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_deserialize() {
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.abc.def",
            "token_type": "bearer"
        }"#;

        let session: UserSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "eyJhbGciOiJIUzI1NiJ9.abc.def");
        assert_eq!(session.token_type, "bearer");
    }

    #[test]
    fn test_profile_deserialize() {
        let json = r#"{"id": 7, "email": "user@example.com"}"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.email, "user@example.com");
    }

    #[test]
    fn test_register_request_serializes_as_json() {
        let body = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["password"], "hunter2");
    }
}
