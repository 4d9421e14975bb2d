//! Login identifier classification.
//!
//! Users sign in with a single free-form field that holds either an email
//! address or a phone number. The backend expects the two to arrive in
//! different request fields, so the raw input is classified before it ever
//! reaches the wire.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How a raw identifier was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// The input looks like an email address.
    Email,
    /// Anything that is not email-shaped is treated as a phone number.
    Phone,
}

/// A classified login identifier.
///
/// Classification is total: every input is either an email or a phone
/// number, never both and never neither. An input counts as an email iff it
/// has the shape `local@domain.tld`:
///
/// - no whitespace anywhere
/// - exactly one `@`, with a non-empty local part before it
/// - a domain containing at least one `.` with characters on both sides
///
/// ## Examples
///
/// ```
/// use platter_core::{Identifier, IdentifierKind};
///
/// assert_eq!(Identifier::classify("a@b.com").kind(), IdentifierKind::Email);
/// assert_eq!(Identifier::classify("9876543210").kind(), IdentifierKind::Phone);
/// assert_eq!(Identifier::classify("not-an-email").kind(), IdentifierKind::Phone);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    raw: String,
    kind: IdentifierKind,
}

impl Identifier {
    /// Classify a raw identifier as email or phone.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let kind = if is_email_shaped(raw) {
            IdentifierKind::Email
        } else {
            IdentifierKind::Phone
        };
        Self {
            raw: raw.to_owned(),
            kind,
        }
    }

    /// The classification result.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Whether this identifier was classified as an email address.
    #[must_use]
    pub const fn is_email(&self) -> bool {
        matches!(self.kind, IdentifierKind::Email)
    }

    /// The raw identifier as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the identifier and returns the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.raw
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Check whether the input matches the email shape `local@domain.tld`.
fn is_email_shaped(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        // zero or more than one @
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // The domain needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}
