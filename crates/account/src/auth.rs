//! Credential submission, registration, and password reset.
//!
//! The submitter wraps the backend client with the form-facing rules: the
//! raw identifier is classified before it reaches the wire, a loading flag
//! strictly brackets each request so one form instance can never have two
//! submissions in flight, and every failure surfaces as a single [`Notice`]
//! instead of an error - the form stays editable and resubmittable.

use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::{ExposeSecret, SecretString};

use platter_core::Identifier;

use crate::api::{BackendClient, RegisterRequest};
use crate::config::Route;
use crate::error::Notice;

const LOGIN_FAILED: &str = "Login failed. Check your details and try again.";
const RESET_REQUESTED: &str = "Password reset requested. Check your inbox or messages.";
const RESET_FAILED: &str = "Could not request a password reset. Try again later.";
const SIGNUP_DONE: &str = "Account created. Log in to continue.";
const SIGNUP_FAILED: &str = "Signup failed. Please try again.";

/// Result of a credential submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The backend accepted the credentials; session evidence is stored and
    /// the caller should navigate to `destination`.
    Success {
        /// Role the backend reported for the user.
        role: String,
        /// Where to go: the admin dashboard for the privileged role, home
        /// otherwise.
        destination: Route,
    },
    /// The submission failed; show the notice, keep the form editable.
    Failed(Notice),
    /// A submission is already in flight; nothing was sent.
    InFlight,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The account was created; navigate to the login view.
    Success {
        /// Navigation signal (always the login view).
        destination: Route,
        /// Confirmation to show.
        notice: Notice,
    },
    /// The registration failed; show the notice, keep the form editable.
    Failed(Notice),
    /// A submission is already in flight; nothing was sent.
    InFlight,
}

/// Submits credentials on behalf of one form instance.
pub struct CredentialSubmitter {
    client: BackendClient,
    in_flight: AtomicBool,
}

/// Resets the loading flag when the bracketed request settles.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CredentialSubmitter {
    /// Create a submitter over the given backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in flight.
    ///
    /// The rendering layer uses this to disable the submit control.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit credentials.
    ///
    /// The identifier is classified as email or phone and exactly one of
    /// the two is sent. On success the session evidence is already stored
    /// by the time this returns; the outcome carries the navigation signal.
    /// Failures never partially apply state.
    pub async fn submit(&self, identifier: &str, password: SecretString) -> LoginOutcome {
        let Some(_guard) = self.begin() else {
            return LoginOutcome::InFlight;
        };

        let identifier = Identifier::classify(identifier);
        match self.client.login(&identifier, &password).await {
            Ok(user) => {
                let destination = route_for_role(&user.role, &self.client.config().privileged_role);
                tracing::info!(role = %user.role, "login succeeded");
                LoginOutcome::Success {
                    role: user.role,
                    destination,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                LoginOutcome::Failed(Notice::error(LOGIN_FAILED))
            }
        }
    }

    /// Register a new account with the configured signup role.
    ///
    /// On success the caller should navigate to the login view - signing up
    /// does not establish a session.
    pub async fn register(
        &self,
        name: &str,
        identifier: &str,
        password: SecretString,
    ) -> SignupOutcome {
        let Some(_guard) = self.begin() else {
            return SignupOutcome::InFlight;
        };

        let identifier = Identifier::classify(identifier);
        let config = self.client.config();
        let request =
            RegisterRequest::new(name, &identifier, password.expose_secret(), &config.signup_role);
        match self.client.register(&request).await {
            Ok(()) => SignupOutcome::Success {
                destination: Route::Login,
                notice: Notice::info(SIGNUP_DONE),
            },
            Err(e) => {
                tracing::warn!(error = %e, "signup failed");
                SignupOutcome::Failed(Notice::error(SIGNUP_FAILED))
            }
        }
    }

    /// Request a password reset for the given identifier.
    ///
    /// Fire-and-forget: both success and failure come back as a notice,
    /// never as an error.
    pub async fn request_password_reset(&self, identifier: &str) -> Notice {
        let identifier = Identifier::classify(identifier);
        match self.client.forget_password(&identifier).await {
            Ok(()) => Notice::info(RESET_REQUESTED),
            Err(e) => {
                tracing::warn!(error = %e, "password reset request failed");
                Notice::error(RESET_FAILED)
            }
        }
    }

    /// Take the loading flag for one bracketed request.
    fn begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| InFlightGuard(&self.in_flight))
    }
}

/// Map a reported role to its post-login destination.
fn route_for_role(role: &str, privileged_role: &str) -> Route {
    if role == privileged_role {
        Route::AdminDashboard
    } else {
        Route::Home
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::config::AccountConfig;
    use crate::session::SessionContext;

    fn submitter() -> CredentialSubmitter {
        let config = AccountConfig::new("http://localhost:0");
        CredentialSubmitter::new(BackendClient::new(config, SessionContext::new()))
    }

    #[test]
    fn test_route_for_privileged_role() {
        assert_eq!(route_for_role("admin", "admin"), Route::AdminDashboard);
    }

    #[test]
    fn test_route_for_default_role() {
        assert_eq!(route_for_role("user", "admin"), Route::Home);
        assert_eq!(route_for_role("", "admin"), Route::Home);
    }

    #[test]
    fn test_loading_flag_brackets_request() {
        let submitter = submitter();
        assert!(!submitter.is_loading());

        let guard = submitter.begin().unwrap();
        assert!(submitter.is_loading());
        // A second submission is refused while the first is in flight.
        assert!(submitter.begin().is_none());

        drop(guard);
        assert!(!submitter.is_loading());
        assert!(submitter.begin().is_some());
    }
}
