//! Shared error type across imixs-metrics crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid configuration or input.
    BadRequest,
    /// Missing or mismatched shared secret.
    Unauthorized,
    /// Event payload could not be turned into labels.
    MalformedEvent,
    /// Counter could not be registered.
    Registration,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error (rendering and friends).
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::MalformedEvent => "MALFORMED_EVENT",
            ClientCode::Registration => "REGISTRATION",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and monitor.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid or missing API key")]
    Unauthorized,
    #[error("malformed event: {0}")]
    MalformedEvent(String),
    #[error("registration failed: {0}")]
    Registration(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("render failed: {0}")]
    Render(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::BadRequest(_) => ClientCode::BadRequest,
            MetricsError::Unauthorized => ClientCode::Unauthorized,
            MetricsError::MalformedEvent(_) => ClientCode::MalformedEvent,
            MetricsError::Registration(_) => ClientCode::Registration,
            MetricsError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetricsError::Render(_) | MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
