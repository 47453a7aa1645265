//! Error types for the core library
//!
//! Besides the crate error, this module owns the client-side failure taxonomy
//! ([`ErrorKind`]) and the fixed table of user-facing messages for it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Classify this error for display
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => ErrorKind::Validation,
        }
    }
}

/// Failure categories shown to the user.
///
/// Categories are assigned on the client: from a structured backend code when
/// the response carries one, otherwise from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No token or user id in session storage
    MissingSession,
    /// Backend rejected the bearer token
    SessionExpired,
    /// Login rejected the submitted credentials
    InvalidCredentials,
    /// Authenticated but not allowed
    AccessDenied,
    /// Request lacked a required identifier
    MissingIdentifier,
    NotFound,
    Conflict,
    Validation,
    Server,
    /// Transport failure, no HTTP response
    Connection,
}

impl ErrorKind {
    /// Map a structured backend error code.
    pub fn from_code(code: &str) -> Option<Self> {
        let kind = match code.trim().to_ascii_uppercase().as_str() {
            "SESSION_EXPIRED" | "TOKEN_EXPIRED" | "INVALID_TOKEN" | "UNAUTHORIZED" => {
                Self::SessionExpired
            }
            "INVALID_CREDENTIALS" => Self::InvalidCredentials,
            "FORBIDDEN" | "ACCESS_DENIED" => Self::AccessDenied,
            "MISSING_ID" | "MISSING_IDENTIFIER" | "MISSING_USER_ID" => Self::MissingIdentifier,
            "NOT_FOUND" | "USER_NOT_FOUND" | "EMAIL_NOT_FOUND" | "ROLE_NOT_FOUND" => {
                Self::NotFound
            }
            "CONFLICT" | "ALREADY_EXISTS" | "EMAIL_TAKEN" => Self::Conflict,
            "VALIDATION_ERROR" | "INVALID_INPUT" | "BAD_REQUEST" => Self::Validation,
            "INTERNAL_ERROR" | "SERVER_ERROR" => Self::Server,
            _ => return None,
        };
        Some(kind)
    }

    /// Map an HTTP status when no structured code is available.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 => Self::SessionExpired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Server,
        }
    }

    /// User-facing message for this category
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingSession | Self::SessionExpired => {
                "Your session has expired. Please log in again."
            }
            Self::InvalidCredentials => "Incorrect email or password.",
            Self::AccessDenied => "You do not have permission to perform this action.",
            Self::MissingIdentifier => "The request is missing a user identifier.",
            Self::NotFound => "The requested resource was not found.",
            Self::Conflict => "This record already exists.",
            Self::Validation => "Some fields are invalid. Please review the form.",
            Self::Server => "The server could not process the request. Please try again later.",
            Self::Connection => {
                "Could not connect to the server. Check your connection and try again."
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_takes_any_case() {
        assert_eq!(
            ErrorKind::from_code("session_expired"),
            Some(ErrorKind::SessionExpired)
        );
        assert_eq!(ErrorKind::from_code(" MISSING_ID "), Some(ErrorKind::MissingIdentifier));
        assert_eq!(ErrorKind::from_code("SOMETHING_ELSE"), None);
    }

    #[test]
    fn status_table() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::SessionExpired);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::AccessDenied);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::Server);
    }

    #[test]
    fn missing_session_reads_as_expired() {
        assert_eq!(
            ErrorKind::MissingSession.message(),
            ErrorKind::SessionExpired.message()
        );
    }
}
