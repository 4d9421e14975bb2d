//! Error and notice types for the account layer.
//!
//! Backend failures never propagate into the view's render path: every
//! fallible call is caught at its call site and converted into a [`Notice`]
//! the rendering layer shows once. [`ApiError`] exists below that seam, for
//! the HTTP client and its direct callers.

use core::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from talking to the Platter backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Response body, for logs; empty when it could not be read.
        body: String,
    },

    /// A response header or payload could not be interpreted.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational, e.g. a confirmation.
    Info,
    /// Something went wrong; the action can be retried.
    Error,
}

/// A single user-visible notice.
///
/// Notices are the only way backend failures reach the user: non-blocking,
/// shown once, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity for styling.
    pub level: NoticeLevel,
    /// Message text shown verbatim.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        let n = Notice::info("reset link sent");
        assert_eq!(n.level, NoticeLevel::Info);
        assert_eq!(n.message, "reset link sent");

        let n = Notice::error("login failed");
        assert_eq!(n.level, NoticeLevel::Error);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "bad credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 401 Unauthorized: bad credentials"
        );
    }
}
