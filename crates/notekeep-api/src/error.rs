//! Errors reported by a [`Backend`](crate::Backend).

use notekeep_protocol::{Endpoint, ProtocolError};

/// Why a backend call didn't produce the expected answer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status the endpoint doesn't treat as
    /// success. `message` is the server's `{"message": ...}`, if it sent one.
    #[error(
        "{endpoint} returned HTTP {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Status {
        endpoint: Endpoint,
        status: u16,
        message: Option<String>,
    },

    /// The request never completed: connection refused, DNS failure,
    /// timeout, or the connection dropped mid-body.
    #[error("{endpoint} could not complete: {reason}")]
    Network { endpoint: Endpoint, reason: String },

    /// The server answered success but the body didn't decode (or the
    /// request body couldn't be encoded).
    #[error("{endpoint}: {source}")]
    Protocol {
        endpoint: Endpoint,
        #[source]
        source: ProtocolError,
    },

    /// The configured base URL can't be used to build endpoint URLs.
    #[error("invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// The HTTP status, for [`ApiError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-supplied message, for [`ApiError::Status`].
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_server_message() {
        let err = ApiError::Status {
            endpoint: Endpoint::Login,
            status: 401,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(
            err.to_string(),
            "POST /login returned HTTP 401: Invalid credentials"
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_status_display_without_message() {
        let err = ApiError::Status {
            endpoint: Endpoint::Logout,
            status: 500,
            message: None,
        };
        assert!(err.to_string().ends_with("no message"));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::Network {
            endpoint: Endpoint::AuthCheck,
            reason: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.server_message(), None);
    }
}
