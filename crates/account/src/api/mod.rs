//! Platter backend API client.
//!
//! One client per session context. Every session-bearing request attaches
//! the evidence token the way the backend set it (as a cookie), and a
//! successful login deposits the returned evidence into the session vault
//! so the detector sees it on the next mount.
//!
//! # Example
//!
//! ```rust,ignore
//! use platter_account::{api::BackendClient, config::AccountConfig, session::SessionContext};
//!
//! let session = SessionContext::new();
//! let client = BackendClient::new(AccountConfig::from_env()?, session.clone());
//!
//! let user = client.login(&identifier, &password).await?;
//! assert!(session.detect().authenticated);
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::header;
use secrecy::{ExposeSecret, SecretString};

use platter_core::Identifier;

use crate::config::AccountConfig;
use crate::error::ApiError;
use crate::session::{SessionContext, SessionEvidence};

/// Client for the Platter backend API.
///
/// Cheaply cloneable; clones share the underlying connection pool, the
/// configuration, and the session context.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    config: AccountConfig,
    session: SessionContext,
}

impl BackendClient {
    /// Create a new backend client bound to a session context.
    #[must_use]
    pub fn new(config: AccountConfig, session: SessionContext) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                http: reqwest::Client::new(),
                config,
                session,
            }),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &AccountConfig {
        &self.inner.config
    }

    /// The session context this client deposits evidence into.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit credentials.
    ///
    /// On success the session evidence from the response (evidence cookie,
    /// falling back to a body token) is stored in the session vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers non-2xx,
    /// or the response body cannot be decoded. No state changes on error.
    pub async fn login(
        &self,
        identifier: &Identifier,
        password: &SecretString,
    ) -> Result<LoginUser, ApiError> {
        let url = self.inner.config.endpoint(&self.inner.config.paths.login);
        let request = LoginRequest::new(identifier, password.expose_secret());

        let response = self.inner.http.post(&url).json(&request).send().await?;
        let response = ensure_success(response).await?;

        // Capture cookie evidence before the body consumes the response.
        let cookie_evidence = self.evidence_from_cookies(&response);

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let evidence = cookie_evidence.or_else(|| {
            body.access_token
                .as_deref()
                .and_then(SessionEvidence::from_token)
        });
        match evidence {
            Some(evidence) => self.inner.session.store(evidence),
            None => tracing::warn!("login succeeded but response carried no session evidence"),
        }

        Ok(body.user)
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), ApiError> {
        let url = self
            .inner
            .config
            .endpoint(&self.inner.config.paths.register);
        let response = self.inner.http.post(&url).json(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Request a password reset for the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    pub async fn forget_password(&self, identifier: &Identifier) -> Result<(), ApiError> {
        let url = self
            .inner
            .config
            .endpoint(&self.inner.config.paths.forget_password);
        let request = PasswordResetRequest::new(identifier);
        let response = self.inner.http.post(&url).json(&request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers non-2xx,
    /// or the envelope cannot be decoded.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let url = self.inner.config.endpoint(&self.inner.config.paths.profile);

        let mut request = self.inner.http.get(&url);
        if let Some(cookie) = self.session_cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let response = ensure_success(response).await?;

        let envelope: ProfileEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Addresses
    // ─────────────────────────────────────────────────────────────────────────

    /// Mirror a locally accepted address to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    /// Callers treat this as best-effort: the local entry stays either way.
    pub async fn mirror_address(&self, payload: &AddressPayload<'_>) -> Result<(), ApiError> {
        let url = self
            .inner
            .config
            .endpoint(&self.inner.config.paths.addresses);

        let mut request = self.inner.http.post(&url).json(payload);
        if let Some(cookie) = self.session_cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Extract session evidence from the response's Set-Cookie headers.
    fn evidence_from_cookies(&self, response: &reqwest::Response) -> Option<SessionEvidence> {
        let wanted = self.inner.config.evidence_cookie.as_str();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|raw| {
                let pair = raw.split(';').next()?;
                let (name, token) = pair.split_once('=')?;
                if name.trim() == wanted {
                    SessionEvidence::from_token(token)
                } else {
                    None
                }
            })
    }

    /// Cookie header value carrying the current session evidence.
    fn session_cookie(&self) -> Option<String> {
        let token = self.inner.session.current_token()?;
        Some(format!("{}={token}", self.inner.config.evidence_cookie))
    }
}

/// Pass a 2xx response through, convert anything else into an error
/// carrying the body text for logs.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}
