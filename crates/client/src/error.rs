//! Error types for vivopass-client

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vivopass_core::ErrorKind;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// No token in session storage
    #[error("No active session")]
    MissingSession,

    /// Token present but no user id stored next to it
    #[error("Stored session has no user id")]
    MissingIdentifier,

    /// Local validation or input error
    #[error(transparent)]
    Core(#[from] vivopass_core::Error),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Request never produced a response
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// UI gate refused the action before any request
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Structured error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default, alias = "mensaje", alias = "error", alias = "title")]
    message: Option<String>,
}

impl ClientError {
    /// Build an API error from a response status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let (code, message) = match envelope {
            Some(env) => (env.code, env.message),
            None => (None, None),
        };
        let message = message
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("request failed with status {}", status));
        Self::Api {
            status,
            code,
            message,
        }
    }

    /// Classify for display. Structured codes win over the status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSession => ErrorKind::MissingSession,
            Self::MissingIdentifier => ErrorKind::MissingIdentifier,
            Self::Core(e) => e.kind(),
            Self::Api { status, code, .. } => code
                .as_deref()
                .and_then(ErrorKind::from_code)
                .unwrap_or_else(|| ErrorKind::from_status(*status)),
            Self::Connection(_) => ErrorKind::Connection,
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::Decode { .. } | Self::Io(_) | Self::Serialization(_) => ErrorKind::Server,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else {
            Self::Connection(e)
        }
    }
}

/// What a page or form shows for a failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiError {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl UiError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

impl From<&ClientError> for UiError {
    fn from(e: &ClientError) -> Self {
        Self::new(e.kind())
    }
}
