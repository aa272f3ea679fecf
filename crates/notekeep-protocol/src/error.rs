//! Error types for the protocol layer.

/// Errors that can occur while building or reading wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A response body could not be decoded into the expected type.
    ///
    /// Carries the parser's message, e.g. "missing field `token`".
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// A request body could not be serialized.
    #[error("failed to encode body: {0}")]
    Encode(String),

    /// A token value was empty or whitespace-only.
    #[error("token must not be empty")]
    EmptyToken,
}
