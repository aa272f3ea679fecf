//! The endpoint table: which path and method each auth operation uses.

use std::fmt;

/// A remote auth endpoint.
///
/// The base host and port are deployment parameters; the paths and methods
/// are fixed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /login` — exchange credentials for a token.
    Login,
    /// `POST /logout` — revoke the bearer token.
    Logout,
    /// `GET /auth-check` — check the bearer token, return its user.
    AuthCheck,
    /// `POST /register` — create an account.
    Register,
}

impl Endpoint {
    /// The request path, relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Logout => "/logout",
            Self::AuthCheck => "/auth-check",
            Self::Register => "/register",
        }
    }

    /// The HTTP method name.
    pub fn method(self) -> &'static str {
        match self {
            Self::AuthCheck => "GET",
            Self::Login | Self::Logout | Self::Register => "POST",
        }
    }

    /// Whether the request must carry `Authorization: Bearer <token>`.
    pub fn requires_token(self) -> bool {
        matches!(self, Self::Logout | Self::AuthCheck)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
