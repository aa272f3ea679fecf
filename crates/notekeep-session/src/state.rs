//! The session state machine.

use std::fmt;

use notekeep_protocol::User;

/// Who the client believes is logged in.
///
/// ```text
///            ┌──(validate ok)──────→ Authenticated(user)
///   Unknown ─┤                           │      ↑
///            └──(no token / invalid)─→ Anonymous ┘ (login ok)
///                                        ↑
///            Authenticated ──(logout / rejected token)
/// ```
///
/// - **Unknown**: startup validation hasn't resolved yet. Guards show a
///   loading placeholder rather than guessing.
/// - **Anonymous**: no valid token. Protected routes redirect to login.
/// - **Authenticated**: the backend vouched for the token and returned
///   this user.
///
/// Once startup validation resolves, the state never returns to `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    /// `true` for `Anonymous` and `Authenticated`.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Anonymous => f.write_str("anonymous"),
            Self::Authenticated(user) => write!(f, "authenticated as {}", user.username),
        }
    }
}
