//! Error types for the Mario Health API adapter.
//!
//! # Design
//! Both the mock client and the real client surface failures through the same
//! `ApiError` enum, so callers match on variants instead of probing message
//! strings. Every non-2xx response lands in `Http` with the numeric status
//! attached; the retry helper inspects that status to decide whether a failure
//! is transient.

use thiserror::Error;

/// Errors returned by every adapter operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The per-attempt timeout elapsed before the request settled.
    #[error("Request timeout after {ms}ms")]
    Timeout { ms: u64 },

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connection refused, reset, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// A mock fixture lookup missed.
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The token provider failed to produce a bearer token.
    #[error("auth token unavailable: {0}")]
    Auth(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx responses are never transient.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// True for a mock lookup miss and for a backend 404 alike.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. }) || self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// Failures worth another attempt. A body that arrived but did not decode
    /// is final: the backend already acted on the request.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Timeout { .. } | ApiError::Network(_) | ApiError::Auth(_) => true,
            ApiError::Http { .. } => !self.is_client_error(),
            ApiError::NotFound { .. }
            | ApiError::Serialization(_)
            | ApiError::Deserialization(_)
            | ApiError::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Deserialization(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
