//! Authenticated-area controller.
//!
//! Composes the session detector, profile fetch, and address book into the
//! state behind the user dashboard. The controller never renders and never
//! blocks rendering: a missing profile degrades the view to no profile
//! panel, and address mirroring failures surface through sync markers and
//! notices, not errors.
//!
//! The mount guard is a contract, not an enforcement: when [`Dashboard::mount`]
//! answers [`MountOutcome::RedirectToLogin`], the surrounding view must
//! navigate away instead of rendering protected data.

use platter_core::AddressId;

use crate::addresses::{Address, AddressBook, AddressCandidate, BlankFields};
use crate::api::{AddressPayload, BackendClient, UserProfile};
use crate::config::Route;
use crate::error::Notice;
use crate::session::SessionContext;

const ADDRESS_SYNC_FAILED: &str = "Address saved on this device but not synced yet.";

/// What the view should do after mounting the dashboard.
#[derive(Debug, Clone)]
pub enum MountOutcome {
    /// No session evidence: the caller must redirect to the login view
    /// without rendering any profile data.
    RedirectToLogin,
    /// Session evidence present; the dashboard is ready.
    Ready {
        /// The fetched profile, or `None` when the fetch failed and the
        /// view degrades by omitting the profile panel.
        profile: Option<UserProfile>,
    },
}

/// Controller state for the authenticated area.
pub struct Dashboard {
    session: SessionContext,
    client: BackendClient,
    addresses: AddressBook,
    profile: Option<UserProfile>,
    notices: Vec<Notice>,
}

impl Dashboard {
    /// Create a dashboard bound to a session context and backend client.
    #[must_use]
    pub const fn new(session: SessionContext, client: BackendClient) -> Self {
        Self {
            session,
            client,
            addresses: AddressBook::new(),
            profile: None,
            notices: Vec::new(),
        }
    }

    /// Run the session detector and, when authenticated, fetch the profile.
    ///
    /// The detector runs first and without any network traffic; a negative
    /// result short-circuits to the redirect signal. A failed profile fetch
    /// is logged and leaves the profile empty - the dashboard still mounts.
    pub async fn mount(&mut self) -> MountOutcome {
        if !self.session.detect().authenticated {
            return MountOutcome::RedirectToLogin;
        }

        match self.client.fetch_profile().await {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed, dashboard degrades without profile panel");
            }
        }

        MountOutcome::Ready {
            profile: self.profile.clone(),
        }
    }

    /// The fetched profile, if the last mount succeeded in fetching it.
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Ordered address projection for rendering.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        self.addresses.list()
    }

    /// Add an address: local insert first, then best-effort backend mirror.
    ///
    /// The local insert settles before any network traffic and is never
    /// rolled back. The mirror result lands in the entry's sync marker; a
    /// failure additionally queues a notice.
    ///
    /// # Errors
    ///
    /// Returns [`BlankFields`] when validation rejects the candidate; the
    /// collection is untouched and nothing is sent.
    pub async fn add_address(&mut self, candidate: &AddressCandidate) -> Result<Address, BlankFields> {
        let added = self.addresses.add(candidate)?;

        let payload = AddressPayload {
            label: &added.label,
            line: &added.line,
            city: &added.city,
            region: &added.region,
            postal_code: &added.postal_code,
            country: &added.country,
        };
        match self.client.mirror_address(&payload).await {
            Ok(()) => self.addresses.mark_synced(added.id),
            Err(e) => {
                tracing::warn!(error = %e, address_id = %added.id, "address mirror failed, keeping local entry");
                self.addresses.mark_sync_failed(added.id);
                self.notices.push(Notice::error(ADDRESS_SYNC_FAILED));
            }
        }

        Ok(self.addresses.get(added.id).cloned().unwrap_or(added))
    }

    /// Remove an address; absent ids are a no-op.
    pub fn remove_address(&mut self, id: AddressId) {
        self.addresses.remove(id);
    }

    /// Make an address the single active one; absent ids are a no-op.
    pub fn set_active_address(&mut self, id: AddressId) {
        self.addresses.set_active(id);
    }

    /// Log out: destroy the local session evidence and signal navigation.
    ///
    /// Unconditional and local-only - no backend invalidation call is made.
    pub fn logout(&mut self) -> Route {
        self.session.clear();
        self.profile = None;
        Route::Login
    }

    /// Drain the pending user-visible notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::config::AccountConfig;
    use crate::session::SessionEvidence;

    fn dashboard() -> Dashboard {
        let session = SessionContext::new();
        let client = BackendClient::new(AccountConfig::new("http://localhost:0"), session.clone());
        Dashboard::new(session, client)
    }

    #[test]
    fn test_logout_clears_evidence_and_profile() {
        let mut dashboard = dashboard();
        dashboard
            .session
            .store(SessionEvidence::from_token("tok").unwrap());

        let destination = dashboard.logout();
        assert_eq!(destination, Route::Login);
        assert!(!dashboard.session.detect().authenticated);
        assert!(dashboard.profile().is_none());
    }

    #[test]
    fn test_address_ops_delegate_to_book() {
        let mut dashboard = dashboard();
        assert!(dashboard.addresses().is_empty());

        // Local-only paths that never touch the network.
        dashboard.remove_address(AddressId::new(1));
        dashboard.set_active_address(AddressId::new(1));
        assert!(dashboard.addresses().is_empty());
    }

    #[test]
    fn test_drain_notices_empties_queue() {
        let mut dashboard = dashboard();
        dashboard.notices.push(Notice::error("one"));
        dashboard.notices.push(Notice::info("two"));

        let drained = dashboard.drain_notices();
        assert_eq!(drained.len(), 2);
        assert!(dashboard.drain_notices().is_empty());
    }
}
