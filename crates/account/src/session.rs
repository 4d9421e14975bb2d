//! Session evidence and the authenticated-or-not check.
//!
//! One session context exists per view tree. It owns the only copy of the
//! session evidence (an opaque token the backend sets at login), so there is
//! exactly one place that decides "logged in" - components receive the
//! context explicitly instead of re-reading ambient storage.
//!
//! Presence of evidence is what gates routing; validity is the backend's
//! call on every protected request.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Name of the backend cookie that delivers session evidence.
pub const EVIDENCE_COOKIE_NAME: &str = "accessToken";

/// Opaque proof of authentication held client-side.
///
/// The token's content is never inspected - only its presence matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionEvidence(String);

impl SessionEvidence {
    /// Wrap a raw token, rejecting malformed (blank) values.
    ///
    /// A blank token reads the same as no token at all: the caller gets
    /// `None` and the session stays unauthenticated.
    #[must_use]
    pub fn from_token(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_owned()))
    }

    /// The raw token, for attaching to backend requests.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Result of a session detection pass.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Whether evidence is present.
    pub authenticated: bool,
    /// The evidence itself, when present.
    pub evidence: Option<SessionEvidence>,
}

/// Per-view-tree session context.
///
/// Cheaply cloneable; clones share the same vault, so evidence stored by
/// the credential submitter is immediately visible to every detector.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    vault: Arc<RwLock<Option<SessionEvidence>>>,
}

impl SessionContext {
    /// Create an empty (unauthenticated) session context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect the current session state.
    ///
    /// Pure read: no network, no side effects. Absence of evidence is the
    /// negative case, not an error. A poisoned vault reads as logged out -
    /// detection fails open to "not authenticated".
    #[must_use]
    pub fn detect(&self) -> SessionState {
        let evidence = self.vault.read().ok().and_then(|guard| guard.clone());
        SessionState {
            authenticated: evidence.is_some(),
            evidence,
        }
    }

    /// Store new session evidence, replacing any previous value.
    ///
    /// At most one evidence value is authoritative per context.
    pub fn store(&self, evidence: SessionEvidence) {
        if let Ok(mut guard) = self.vault.write() {
            *guard = Some(evidence);
        }
    }

    /// Destroy the session evidence (logout).
    pub fn clear(&self) {
        if let Ok(mut guard) = self.vault.write() {
            *guard = None;
        }
    }

    /// The current raw token, for request plumbing.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.detect().evidence.map(|e| e.token().to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_without_evidence() {
        let ctx = SessionContext::new();
        let state = ctx.detect();
        assert!(!state.authenticated);
        assert!(state.evidence.is_none());
    }

    #[test]
    fn test_store_then_detect() {
        let ctx = SessionContext::new();
        ctx.store(SessionEvidence::from_token("tok-123").unwrap());

        let state = ctx.detect();
        assert!(state.authenticated);
        assert_eq!(state.evidence.unwrap().token(), "tok-123");
    }

    #[test]
    fn test_clear_destroys_evidence() {
        let ctx = SessionContext::new();
        ctx.store(SessionEvidence::from_token("tok-123").unwrap());
        ctx.clear();
        assert!(!ctx.detect().authenticated);
    }

    #[test]
    fn test_blank_token_is_malformed() {
        assert!(SessionEvidence::from_token("").is_none());
        assert!(SessionEvidence::from_token("   ").is_none());
    }

    #[test]
    fn test_clones_share_the_vault() {
        let ctx = SessionContext::new();
        let detector = ctx.clone();
        ctx.store(SessionEvidence::from_token("tok-456").unwrap());
        assert!(detector.detect().authenticated);

        ctx.clear();
        assert!(!detector.detect().authenticated);
    }

    #[test]
    fn test_store_replaces_previous_evidence() {
        let ctx = SessionContext::new();
        ctx.store(SessionEvidence::from_token("first").unwrap());
        ctx.store(SessionEvidence::from_token("second").unwrap());
        assert_eq!(ctx.current_token().unwrap(), "second");
    }
}
