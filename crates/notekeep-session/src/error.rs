//! Error types for the session layer.

use notekeep_api::ApiError;
use notekeep_protocol::Endpoint;
use notekeep_store::StoreError;

/// Errors surfaced by session operations.
///
/// `validate()` never returns these; it recovers locally by logging out.
/// `login`, `logout`, and `register` return them so the initiating view can
/// show a message.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend rejected the session token (missing, expired, revoked).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request could not complete (connection refused, timeout, ...).
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The backend rejected the credentials or input.
    ///
    /// Displays exactly the server's message, e.g. `invalid credentials`,
    /// so views can show it as-is.
    #[error("{0}")]
    ValidationFailure(String),

    /// The backend answered success with a body that didn't decode.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The token slot couldn't be written or cleared.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A newer login/logout/validate started while this one was in flight,
    /// so this result was discarded.
    #[error("superseded by a newer session operation")]
    Superseded,
}

impl SessionError {
    /// Classifies a backend failure.
    ///
    /// A 401 from an endpoint that carries the bearer token means the token
    /// is bad; any other rejection (including a 401 from `/login`, which
    /// means bad credentials) is a validation failure with the server's
    /// message, or a generic one if the server sent none.
    pub fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                endpoint,
                status,
                message,
            } => {
                let message = message.unwrap_or_else(|| fallback_message(endpoint).to_string());
                if status == 401 && endpoint.requires_token() {
                    Self::Unauthorized(message)
                } else {
                    Self::ValidationFailure(message)
                }
            }
            ApiError::Network { reason, .. } => Self::NetworkFailure(reason),
            ApiError::Protocol { source, .. } => Self::MalformedResponse(source.to_string()),
            ApiError::Config(reason) => Self::NetworkFailure(reason),
        }
    }
}

fn fallback_message(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Login => "Login failed",
        Endpoint::Logout => "Logout failed",
        Endpoint::AuthCheck => "Session expired",
        Endpoint::Register => "Registration failed",
    }
}
