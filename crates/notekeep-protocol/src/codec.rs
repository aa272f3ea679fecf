//! JSON body encoding and decoding.
//!
//! Every endpoint speaks JSON, so there is no codec trait to pick an
//! implementation from. These helpers exist so that a body which fails to
//! decode surfaces as [`ProtocolError::MalformedBody`] instead of a raw
//! `serde_json::Error`, which keeps "the server answered garbage" distinct
//! from "the request never completed" further up the stack.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Serializes a request body to JSON bytes.
///
/// # Errors
/// Returns [`ProtocolError::Encode`] if the value cannot be represented
/// as JSON (e.g. a map with non-string keys).
pub fn encode_body<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(value).map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Decodes a response body from JSON bytes.
///
/// Unknown fields are ignored, so extra attributes the server adds (the
/// reference backend echoes a password hash in its user records) never make
/// decoding fail and are never retained.
///
/// # Errors
/// Returns [`ProtocolError::MalformedBody`] if the bytes are not valid JSON
/// or don't match `T`.
pub fn decode_body<T: DeserializeOwned>(data: &[u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(data)
        .map_err(|e| ProtocolError::MalformedBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Credentials, LoginResponse, User};

    #[test]
    fn test_decode_body_login_response_ignores_password_hash() {
        let body = br#"{
            "token": "abc.def",
            "user": {"id": 3, "username": "alice", "email": "a@x.com", "password": "$2b$12$hash"}
        }"#;

        let resp: LoginResponse = decode_body(body).expect("should decode");

        assert_eq!(resp.token.as_str(), "abc.def");
        assert_eq!(resp.user.username, "alice");
        assert_eq!(resp.user.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_decode_body_missing_field_is_malformed() {
        let result: Result<LoginResponse, _> = decode_body(br#"{"user": {"username": "a"}}"#);

        assert!(
            matches!(result, Err(ProtocolError::MalformedBody(ref msg)) if msg.contains("token")),
            "got {result:?}"
        );
    }

    #[test]
    fn test_decode_body_not_json_is_malformed() {
        let result: Result<User, _> = decode_body(b"<html>502 Bad Gateway</html>");

        assert!(matches!(result, Err(ProtocolError::MalformedBody(_))));
    }

    #[test]
    fn test_decode_body_empty_token_is_malformed() {
        let result: Result<LoginResponse, _> =
            decode_body(br#"{"token": "", "user": {"username": "a"}}"#);

        assert!(matches!(result, Err(ProtocolError::MalformedBody(_))));
    }

    #[test]
    fn test_encode_body_credentials_uses_wire_field_names() {
        let creds = Credentials::new("a@x.com", "hunter2");

        let bytes = encode_body(&creds).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["password"], "hunter2");
    }
}
