//! Unified error type for the Notekeep client.

use notekeep_api::ApiError;
use notekeep_protocol::ProtocolError;
use notekeep_session::SessionError;
use notekeep_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// Each variant is transparent, so `Display` is exactly the inner error's.
/// For a rejected login that means the server's own message.
#[derive(Debug, thiserror::Error)]
pub enum NotekeepError {
    /// Bad wire data (malformed body, empty token).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Token storage I/O.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Backend configuration or a raw backend failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login, logout, or registration failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl NotekeepError {
    /// Whether the backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            NotekeepError::Session(SessionError::Unauthorized(_)) => true,
            NotekeepError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use notekeep_protocol::Endpoint;

    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err: NotekeepError = ProtocolError::EmptyToken.into();
        assert!(matches!(err, NotekeepError::Protocol(_)));
    }

    #[test]
    fn test_from_store_error() {
        let err: NotekeepError = StoreError::Corrupt {
            path: "session.json".into(),
            reason: "not an object".into(),
        }
        .into();
        assert!(matches!(err, NotekeepError::Store(_)));
        assert!(err.to_string().contains("session.json"));
    }

    #[test]
    fn test_from_api_error() {
        let err: NotekeepError = ApiError::Config("bad url".into()).into();
        assert!(matches!(err, NotekeepError::Api(_)));
        assert!(err.to_string().contains("bad url"));
    }

    #[test]
    fn test_from_session_error_displays_server_message() {
        let err: NotekeepError = SessionError::ValidationFailure("invalid credentials".into()).into();
        assert!(matches!(err, NotekeepError::Session(_)));
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_is_unauthorized_session_and_api() {
        let session: NotekeepError = SessionError::Unauthorized("Session expired".into()).into();
        assert!(session.is_unauthorized());

        let api: NotekeepError = ApiError::Status {
            endpoint: Endpoint::AuthCheck,
            status: 401,
            message: None,
        }
        .into();
        assert!(api.is_unauthorized());

        let other: NotekeepError = SessionError::Superseded.into();
        assert!(!other.is_unauthorized());
    }
}
