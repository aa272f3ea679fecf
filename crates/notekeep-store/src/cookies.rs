//! The legacy cookie mirror of the session token.
//!
//! Older deployments of the backend set the token as a `token` cookie as
//! well as returning it in the login body. The client never writes that
//! cookie; it only reads it as a recovery path when the slot is empty, and
//! expires it on logout so the recovery path can't resurrect a dead session.

use cookie::{Cookie, Expiration};
use time::OffsetDateTime;

/// An in-memory cookie jar parsed from a `Cookie:`-style header.
///
/// Expiring a cookie doesn't delete it; it replaces it with an empty,
/// already-expired tombstone, the same way a browser handles
/// `token=; expires=Thu, 01 Jan 1970 00:00:00 GMT`. Expired cookies are
/// invisible to [`get`](Self::get) and [`header`](Self::header).
#[derive(Debug, Clone, Default)]
pub struct CookieMirror {
    cookies: Vec<Cookie<'static>>,
}

impl CookieMirror {
    /// Creates an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a header like `theme=dark; token=abc`.
    ///
    /// Malformed pairs are skipped. If a name appears twice, the later one
    /// wins.
    pub fn parse(header: &str) -> Self {
        let mut mirror = Self::new();
        for parsed in Cookie::split_parse(header.to_string()) {
            match parsed {
                Ok(cookie) => mirror.insert(cookie),
                Err(e) => tracing::debug!(error = %e, "skipping malformed cookie pair"),
            }
        }
        mirror
    }

    /// Adds a cookie, replacing any existing cookie with the same name.
    pub fn insert(&mut self, cookie: Cookie<'static>) {
        self.cookies.retain(|c| c.name() != cookie.name());
        self.cookies.push(cookie);
    }

    /// Returns the value of a live cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .iter()
            .find(|c| c.name() == name)
            .filter(|c| !is_expired(c, now))
            .map(|c| c.value())
    }

    /// Expires `name` by replacing it with an empty, past-dated cookie.
    pub fn expire(&mut self, name: &str) {
        let tombstone = Cookie::build((name.to_string(), ""))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build();
        self.insert(tombstone);
    }

    /// Renders the live cookies back into a `Cookie:` header value.
    pub fn header(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .iter()
            .filter(|c| !is_expired(c, now))
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    if let Some(max_age) = cookie.max_age() {
        if max_age <= time::Duration::ZERO {
            return true;
        }
    }
    matches!(cookie.expires(), Some(Expiration::DateTime(at)) if at <= now)
}
