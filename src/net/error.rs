//! Error types for API calls.

use super::http::Body;

/// Failure reported by a [`Transport`](super::http::Transport) before any
/// HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// Errors surfaced by [`ApiClient`](super::client::ApiClient) calls and the
/// session actions built on them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// No response was received (server unreachable, DNS, CORS, ...).
    #[error("network unreachable: {0}")]
    Network(String),

    /// The server answered with a non-success status. `body` has already
    /// been through envelope repair.
    #[error("HTTP {status}")]
    Http { status: u16, body: Body },

    /// A success body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// An auth response carried no token in either accepted shape.
    #[error("auth response missing token")]
    MissingToken,

    /// A request or cache payload could not be serialized.
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Error body for UI-level messaging (validation errors on 422, etc.).
    #[must_use]
    pub fn body(&self) -> Option<&Body> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::Timeout,
            TransportError::Network(message) => Self::Network(message),
        }
    }
}
