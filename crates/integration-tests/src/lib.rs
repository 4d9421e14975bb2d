//! Integration tests for Platter.
//!
//! The account layer is exercised end-to-end against a mock backend
//! ([`wiremock`]), so the full HTTP round trip runs - request bodies,
//! cookies, status handling - without a live deployment.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p platter-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `login` - credential submission, registration, password reset
//! - `dashboard` - session gating, profile fetch, logout
//! - `addresses` - local-first address mirroring

use wiremock::MockServer;

use platter_account::api::BackendClient;
use platter_account::config::AccountConfig;
use platter_account::session::SessionContext;

/// A mock backend plus the account-layer plumbing pointed at it.
pub struct TestBackend {
    /// The wiremock server standing in for the Platter backend.
    pub server: MockServer,
    /// Configuration pointing at the mock server, defaults otherwise.
    pub config: AccountConfig,
    /// The session context shared by the client below.
    pub session: SessionContext,
    /// Backend client bound to `session`.
    pub client: BackendClient,
}

/// Start a mock backend and wire a fresh session context to it.
pub async fn test_backend() -> TestBackend {
    let server = MockServer::start().await;
    let config = AccountConfig::new(server.uri());
    let session = SessionContext::new();
    let client = BackendClient::new(config.clone(), session.clone());
    TestBackend {
        server,
        config,
        session,
        client,
    }
}

/// A login response body with the given role and no body token.
#[must_use]
pub fn login_body(role: &str) -> serde_json::Value {
    serde_json::json!({
        "user": {
            "role": role,
            "name": "Asha",
            "email": "asha@example.com"
        }
    })
}

/// A profile envelope the `/api/users/me` endpoint would return.
#[must_use]
pub fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "id": 7,
            "name": "Asha",
            "email": "asha@example.com",
            "mobile": "9876543210",
            "role": "user",
            "status": "active",
            "last_login_date": "2026-07-01T09:30:00Z"
        }
    })
}

/// The Set-Cookie header value the backend uses for session evidence.
#[must_use]
pub fn evidence_cookie(token: &str) -> String {
    format!("accessToken={token}; Path=/; HttpOnly")
}
