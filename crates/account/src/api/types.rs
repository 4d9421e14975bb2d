//! Wire types for the Platter backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use platter_core::{Identifier, UserId};

/// Split a classified identifier into the backend's two request fields.
///
/// Exactly one side is ever populated - the backend receives `email` or
/// `mobile`, never both.
fn split(identifier: &Identifier) -> (Option<&str>, Option<&str>) {
    if identifier.is_email() {
        (Some(identifier.as_str()), None)
    } else {
        (None, Some(identifier.as_str()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a credential submission.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Email identifier, when the input classified as email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    /// Phone identifier, when the input classified as phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<&'a str>,
    /// The secret, exposed only at serialization.
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    /// Build a login body carrying exactly one identifier field.
    #[must_use]
    pub fn new(identifier: &'a Identifier, password: &'a str) -> Self {
        let (email, mobile) = split(identifier);
        Self {
            email,
            mobile,
            password,
        }
    }
}

/// Body of a password reset request.
#[derive(Debug, Serialize)]
pub struct PasswordResetRequest<'a> {
    /// Email identifier, when the input classified as email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    /// Phone identifier, when the input classified as phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<&'a str>,
}

impl<'a> PasswordResetRequest<'a> {
    /// Build a reset body carrying exactly one identifier field.
    #[must_use]
    pub fn new(identifier: &'a Identifier) -> Self {
        let (email, mobile) = split(identifier);
        Self { email, mobile }
    }
}

/// Body of a registration request.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    /// Display name for the new account.
    pub name: &'a str,
    /// Email identifier, when the input classified as email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    /// Phone identifier, when the input classified as phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<&'a str>,
    /// The secret, exposed only at serialization.
    pub password: &'a str,
    /// Role the account is created with.
    pub role: &'a str,
}

impl<'a> RegisterRequest<'a> {
    /// Build a registration body carrying exactly one identifier field.
    #[must_use]
    pub fn new(name: &'a str, identifier: &'a Identifier, password: &'a str, role: &'a str) -> Self {
        let (email, mobile) = split(identifier);
        Self {
            name,
            email,
            mobile,
            password,
            role,
        }
    }
}

/// An address candidate as the backend expects it - no identifier, no
/// active flag, wire field names.
#[derive(Debug, Serialize)]
pub struct AddressPayload<'a> {
    /// Short label ("Home", "Office").
    #[serde(rename = "address_name")]
    pub label: &'a str,
    /// Street line.
    #[serde(rename = "address_line")]
    pub line: &'a str,
    /// City.
    pub city: &'a str,
    /// State or region.
    #[serde(rename = "state")]
    pub region: &'a str,
    /// Postal code.
    #[serde(rename = "pincode")]
    pub postal_code: &'a str,
    /// Country.
    pub country: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Response to a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: LoginUser,
    /// Session token, when the backend returns it in the body instead of
    /// (or in addition to) the evidence cookie.
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<String>,
}

/// The user block of a login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    /// Role name, compared against the configured privileged role for
    /// routing.
    pub role: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email, when the account has one.
    #[serde(default)]
    pub email: Option<String>,
}

/// Envelope around the profile payload.
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    /// The profile record.
    pub data: UserProfile,
}

/// The signed-in user's profile record.
///
/// Read-only in this layer: fetched once per session, stale until
/// re-fetched, never mutated client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Backend identifier.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Display name.
    pub name: String,
    /// Email, when the account has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number, when the account has one.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Role name.
    pub role: String,
    /// Account status as reported by the backend.
    #[serde(default)]
    pub status: Option<String>,
    /// Last login timestamp, raw as reported.
    #[serde(default)]
    pub last_login_date: Option<String>,
}

impl UserProfile {
    /// Parse the `last_login_date` timestamp.
    #[must_use]
    pub fn last_login_datetime(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_login_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_email_only() {
        let identifier = Identifier::classify("a@b.com");
        let body = serde_json::to_value(LoginRequest::new(&identifier, "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "a@b.com", "password": "pw"})
        );
    }

    #[test]
    fn test_login_request_mobile_only() {
        let identifier = Identifier::classify("9876543210");
        let body = serde_json::to_value(LoginRequest::new(&identifier, "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"mobile": "9876543210", "password": "pw"})
        );
    }

    #[test]
    fn test_reset_request_never_carries_both() {
        let identifier = Identifier::classify("not-an-email");
        let body = serde_json::to_value(PasswordResetRequest::new(&identifier)).unwrap();
        assert_eq!(body, serde_json::json!({"mobile": "not-an-email"}));
    }

    #[test]
    fn test_register_request_shape() {
        let identifier = Identifier::classify("new@user.com");
        let body =
            serde_json::to_value(RegisterRequest::new("New User", &identifier, "pw", "user"))
                .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "New User",
                "email": "new@user.com",
                "password": "pw",
                "role": "user"
            })
        );
    }

    #[test]
    fn test_address_payload_wire_names() {
        let payload = AddressPayload {
            label: "Home",
            line: "221B",
            city: "Jaipur",
            region: "RJ",
            postal_code: "302001",
            country: "IN",
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "address_name": "Home",
                "address_line": "221B",
                "city": "Jaipur",
                "state": "RJ",
                "pincode": "302001",
                "country": "IN"
            })
        );
    }

    #[test]
    fn test_login_response_with_body_token() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "user": {"role": "admin", "name": "A"},
            "accessToken": "tok-1"
        }))
        .unwrap();
        assert_eq!(response.user.role, "admin");
        assert_eq!(response.access_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_profile_envelope_and_timestamp() {
        let envelope: ProfileEnvelope = serde_json::from_value(serde_json::json!({
            "data": {
                "id": 7,
                "name": "Asha",
                "email": "asha@example.com",
                "mobile": "9876543210",
                "role": "user",
                "status": "active",
                "last_login_date": "2026-07-01T09:30:00Z"
            }
        }))
        .unwrap();

        let profile = envelope.data;
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.id, Some(UserId::new(7)));
        let parsed = profile.last_login_datetime().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-07-01T09:30:00+00:00");
    }

    #[test]
    fn test_profile_tolerates_missing_optionals() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "name": "Asha",
            "role": "user"
        }))
        .unwrap();
        assert!(profile.last_login_date.is_none());
        assert!(profile.last_login_datetime().is_none());
    }
}
