//! Account smoke-check commands.
//!
//! Each command builds a fresh session context, drives the account layer
//! against the configured backend, and reports through tracing. These are
//! operator checks, not an end-user surface.
//!
//! # Environment Variables
//!
//! - `PLATTER_BACKEND_URL` - Base URL of the backend (required)

use secrecy::SecretString;
use thiserror::Error;

use platter_account::api::BackendClient;
use platter_account::auth::{CredentialSubmitter, LoginOutcome};
use platter_account::config::{AccountConfig, ConfigError};
use platter_account::dashboard::{Dashboard, MountOutcome};
use platter_account::error::NoticeLevel;
use platter_account::session::SessionContext;

/// Errors that can occur during account commands.
#[derive(Debug, Error)]
pub enum AccountCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend rejected the credentials.
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// The reset request did not go through.
    #[error("Password reset failed: {0}")]
    ResetFailed(String),
}

/// Submit credentials and report role and destination route.
///
/// # Errors
///
/// Returns an error if configuration is missing or the backend rejects the
/// credentials.
pub async fn login(identifier: &str, password: String) -> Result<(), AccountCommandError> {
    let (config, submitter, _session) = build(identifier)?;

    match submitter.submit(identifier, SecretString::from(password)).await {
        LoginOutcome::Success { role, destination } => {
            tracing::info!("Login accepted");
            tracing::info!("  Role: {}", role);
            tracing::info!("  Destination: {}", config.route_path(destination));
            Ok(())
        }
        LoginOutcome::Failed(notice) => Err(AccountCommandError::LoginFailed(notice.message)),
        LoginOutcome::InFlight => unreachable!("fresh submitter has no request in flight"),
    }
}

/// Log in, mount the dashboard, and print the profile record.
///
/// # Errors
///
/// Returns an error if configuration is missing or the backend rejects the
/// credentials. A failed profile fetch is reported, not fatal - the same
/// degraded behavior the dashboard gives the view layer.
pub async fn profile(identifier: &str, password: String) -> Result<(), AccountCommandError> {
    let (config, submitter, session) = build(identifier)?;

    match submitter.submit(identifier, SecretString::from(password)).await {
        LoginOutcome::Success { .. } => {}
        LoginOutcome::Failed(notice) => {
            return Err(AccountCommandError::LoginFailed(notice.message));
        }
        LoginOutcome::InFlight => unreachable!("fresh submitter has no request in flight"),
    }

    let client = BackendClient::new(config, session.clone());
    let mut dashboard = Dashboard::new(session, client);
    match dashboard.mount().await {
        MountOutcome::Ready {
            profile: Some(profile),
        } => {
            tracing::info!("Profile:");
            tracing::info!("  Name: {}", profile.name);
            tracing::info!("  Email: {}", profile.email.as_deref().unwrap_or("-"));
            tracing::info!("  Mobile: {}", profile.mobile.as_deref().unwrap_or("-"));
            tracing::info!("  Role: {}", profile.role);
            tracing::info!("  Status: {}", profile.status.as_deref().unwrap_or("-"));
            if let Some(last_login) = profile.last_login_datetime() {
                tracing::info!("  Last login: {}", last_login);
            }
        }
        MountOutcome::Ready { profile: None } => {
            tracing::warn!("Logged in, but the profile could not be fetched");
        }
        MountOutcome::RedirectToLogin => {
            tracing::warn!("Login response carried no session evidence; profile is gated");
        }
    }
    Ok(())
}

/// Fire a password reset request for the identifier.
///
/// # Errors
///
/// Returns an error if configuration is missing or the reset request did
/// not go through.
pub async fn reset_password(identifier: &str) -> Result<(), AccountCommandError> {
    let (_config, submitter, _session) = build(identifier)?;

    let notice = submitter.request_password_reset(identifier).await;
    match notice.level {
        NoticeLevel::Info => {
            tracing::info!("{}", notice.message);
            Ok(())
        }
        NoticeLevel::Error => Err(AccountCommandError::ResetFailed(notice.message)),
    }
}

/// Shared setup: config from env, one session context, one submitter.
fn build(
    identifier: &str,
) -> Result<(AccountConfig, CredentialSubmitter, SessionContext), AccountCommandError> {
    dotenvy::dotenv().ok();

    let config = AccountConfig::from_env()?;
    let session = SessionContext::new();
    let client = BackendClient::new(config.clone(), session.clone());

    let classified = platter_core::Identifier::classify(identifier);
    tracing::info!(
        "Identifier {} classified as {:?}",
        classified.as_str(),
        classified.kind()
    );

    Ok((config, CredentialSubmitter::new(client), session))
}
