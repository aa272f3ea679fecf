//! Request and response bodies for the auth endpoints.
//!
//! The backend speaks plain JSON. These types mirror its payloads field for
//! field so serde can map them directly; anything the client doesn't need
//! is simply not declared and gets dropped during decoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// An opaque session credential issued by the backend on login.
///
/// The client never looks inside a token. It stores it, sends it back as a
/// bearer header, and throws it away on logout. The only rule enforced here
/// is that a token is never empty: an empty string in storage or in a login
/// response means "no token", not "a token that happens to be blank".
///
/// `Debug` and `Display` print a short prefix only, so a token that ends up
/// in a log line can't be replayed from there.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Wraps a raw token value.
    ///
    /// Surrounding whitespace is trimmed (cookie headers and hand-edited
    /// state files both tend to pick some up).
    ///
    /// # Errors
    /// Returns [`ProtocolError::EmptyToken`] if nothing is left after trimming.
    pub fn new(raw: impl Into<String>) -> Result<Self, ProtocolError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::EmptyToken);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the value of an `Authorization` header: `Bearer <token>`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}…")
    }
}

impl TryFrom<String> for Token {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The backend's numeric user identifier.
///
/// Newtype over `u64` so it can't be confused with any other integer, and
/// `#[serde(transparent)]` so it travels as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// The authenticated user, as returned by `/login` and `/auth-check`.
///
/// Only `username` is guaranteed; `id` and `email` are present on the
/// reference backend but optional here so a leaner backend still works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Creates a user record with only a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(UserId(id));
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful `POST /login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Token,
    pub user: User,
}

/// Successful `GET /auth-check` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    pub user: User,
}

/// Body of any non-success response.
///
/// The backend usually sends `{"message": "..."}`, but proxies and crashes
/// don't, so the message is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_new_trims_whitespace() {
        let token = Token::new("  abc123 \n").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_token_new_empty_returns_error() {
        assert!(matches!(Token::new(""), Err(ProtocolError::EmptyToken)));
        assert!(matches!(Token::new("   "), Err(ProtocolError::EmptyToken)));
    }

    #[test]
    fn test_token_bearer_format() {
        let token = Token::new("abc").unwrap();
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[test]
    fn test_token_debug_does_not_leak_value() {
        let token = Token::new("eyJhbGciOiJIUzI1NiJ9.secret-part").unwrap();

        let debug = format!("{token:?}");
        let display = token.to_string();

        assert!(!debug.contains("secret-part"), "debug leaked: {debug}");
        assert!(!display.contains("secret-part"), "display leaked: {display}");
        assert!(display.starts_with("eyJhbG"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("a@x.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_registration_debug_redacts_password() {
        let reg = Registration::new("alice", "a@x.com", "hunter2");
        assert!(!format!("{reg:?}").contains("hunter2"));
    }

    #[test]
    fn test_user_only_username_required() {
        let user: User = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(user, User::new("alice"));
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId(42).to_string(), "U-42");
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }
}
