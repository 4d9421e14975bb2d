//! Account layer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLATTER_BACKEND_URL` - Base URL of the Platter backend
//!
//! ## Optional
//! - `PLATTER_LOGIN_PATH` - Login endpoint (default: /api/users/Login)
//! - `PLATTER_REGISTER_PATH` - Signup endpoint (default: /api/users/Register)
//! - `PLATTER_FORGET_PASSWORD_PATH` - Reset endpoint (default: /api/users/forget-password)
//! - `PLATTER_PROFILE_PATH` - Profile endpoint (default: /api/users/me)
//! - `PLATTER_ADDRESSES_PATH` - Address mirror endpoint (default: /api/user/addresses)
//! - `PLATTER_EVIDENCE_COOKIE` - Session evidence cookie name (default: accessToken)
//! - `PLATTER_PRIVILEGED_ROLE` - Role routed to the admin dashboard (default: admin)
//! - `PLATTER_SIGNUP_ROLE` - Role sent on registration (default: user)
//! - `PLATTER_ROUTE_LOGIN` - Login view route (default: /login)
//! - `PLATTER_ROUTE_HOME` - Default post-login route (default: /)
//! - `PLATTER_ROUTE_ADMIN` - Admin dashboard route (default: /admin-dashboard)

use thiserror::Error;
use url::Url;

use crate::session::EVIDENCE_COOKIE_NAME;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Navigation destinations the account layer can signal.
///
/// The rendering layer resolves these to concrete paths via
/// [`AccountConfig::route_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The login view. Signaled when no session evidence is present and on
    /// logout.
    Login,
    /// The default post-login destination.
    Home,
    /// The administrative dashboard, for the privileged role.
    AdminDashboard,
}

/// Backend endpoint paths.
///
/// Paths are deployment configuration, not constants - the defaults match
/// the current backend but every one can be overridden.
#[derive(Debug, Clone)]
pub struct BackendPaths {
    /// `POST` - credential submission.
    pub login: String,
    /// `POST` - account registration.
    pub register: String,
    /// `POST` - password reset request.
    pub forget_password: String,
    /// `GET` - current user's profile.
    pub profile: String,
    /// `POST` - address mirroring.
    pub addresses: String,
}

impl Default for BackendPaths {
    fn default() -> Self {
        Self {
            login: "/api/users/Login".to_owned(),
            register: "/api/users/Register".to_owned(),
            forget_password: "/api/users/forget-password".to_owned(),
            profile: "/api/users/me".to_owned(),
            addresses: "/api/user/addresses".to_owned(),
        }
    }
}

/// View-layer route paths for the [`Route`] signals.
#[derive(Debug, Clone)]
pub struct RoutePaths {
    /// Path of the login view.
    pub login: String,
    /// Path of the default post-login view.
    pub home: String,
    /// Path of the administrative dashboard.
    pub admin_dashboard: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            home: "/".to_owned(),
            admin_dashboard: "/admin-dashboard".to_owned(),
        }
    }
}

/// Account layer configuration.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Base URL of the Platter backend, without a trailing slash.
    pub base_url: String,
    /// Backend endpoint paths.
    pub paths: BackendPaths,
    /// View-layer route paths.
    pub routes: RoutePaths,
    /// Name of the cookie carrying session evidence.
    pub evidence_cookie: String,
    /// Role name that routes to the admin dashboard after login.
    pub privileged_role: String,
    /// Role name sent with registration requests.
    pub signup_role: String,
}

impl AccountConfig {
    /// Create a configuration for the given backend with default paths,
    /// routes, and role names.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            paths: BackendPaths::default(),
            routes: RoutePaths::default(),
            evidence_cookie: EVIDENCE_COOKIE_NAME.to_owned(),
            privileged_role: "admin".to_owned(),
            signup_role: "user".to_owned(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PLATTER_BACKEND_URL` is missing or is not
    /// a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("PLATTER_BACKEND_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("PLATTER_BACKEND_URL".to_string(), e.to_string())
        })?;

        let mut config = Self::new(base_url);
        config.paths = BackendPaths {
            login: get_env_or_default("PLATTER_LOGIN_PATH", &config.paths.login),
            register: get_env_or_default("PLATTER_REGISTER_PATH", &config.paths.register),
            forget_password: get_env_or_default(
                "PLATTER_FORGET_PASSWORD_PATH",
                &config.paths.forget_password,
            ),
            profile: get_env_or_default("PLATTER_PROFILE_PATH", &config.paths.profile),
            addresses: get_env_or_default("PLATTER_ADDRESSES_PATH", &config.paths.addresses),
        };
        config.routes = RoutePaths {
            login: get_env_or_default("PLATTER_ROUTE_LOGIN", &config.routes.login),
            home: get_env_or_default("PLATTER_ROUTE_HOME", &config.routes.home),
            admin_dashboard: get_env_or_default(
                "PLATTER_ROUTE_ADMIN",
                &config.routes.admin_dashboard,
            ),
        };
        config.evidence_cookie =
            get_env_or_default("PLATTER_EVIDENCE_COOKIE", &config.evidence_cookie);
        config.privileged_role =
            get_env_or_default("PLATTER_PRIVILEGED_ROLE", &config.privileged_role);
        config.signup_role = get_env_or_default("PLATTER_SIGNUP_ROLE", &config.signup_role);

        Ok(config)
    }

    /// Full URL for a backend endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resolve a [`Route`] signal to its configured view path.
    #[must_use]
    pub fn route_path(&self, route: Route) -> &str {
        match route {
            Route::Login => &self.routes.login,
            Route::Home => &self.routes.home,
            Route::AdminDashboard => &self.routes.admin_dashboard,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
