//! The token store: one current token, two places it can be read from.

use std::sync::{Mutex, MutexGuard};

use notekeep_protocol::Token;

use crate::{CookieMirror, FileSlot, Slot, StoreError};

/// Key under which the token is kept in the persistent slot.
pub const TOKEN_KEY: &str = "token";

/// Name of the legacy cookie that mirrors the token.
pub const TOKEN_COOKIE: &str = "token";

/// Holds the current session token.
///
/// ## Read priority
///
/// ```text
/// read() ──→ slot has a non-empty value? ──yes──→ that token
///                    │ no (or slot unreadable)
///                    ▼
///            live `token` cookie? ──yes──→ that token
///                    │ no
///                    ▼
///                 absent
/// ```
///
/// `write` only touches the slot. `clear` empties the slot and expires the
/// cookie under the same lock, so no caller can observe one cleared while
/// the other still yields a token.
pub struct TokenStore<S: Slot = FileSlot> {
    inner: Mutex<Inner<S>>,
}

struct Inner<S> {
    slot: S,
    cookies: CookieMirror,
}

impl<S: Slot> TokenStore<S> {
    /// Creates a store over `slot` with no legacy cookies.
    pub fn new(slot: S) -> Self {
        Self::with_cookies(slot, CookieMirror::new())
    }

    /// Creates a store over `slot` that can fall back to `cookies`.
    pub fn with_cookies(slot: S, cookies: CookieMirror) -> Self {
        Self {
            inner: Mutex::new(Inner { slot, cookies }),
        }
    }

    /// Returns the current token, if any. No side effects.
    ///
    /// A slot that can't be read is logged and skipped, not reported: the
    /// caller gets the cookie fallback or "absent", which the session layer
    /// treats as "not logged in".
    pub fn read(&self) -> Option<Token> {
        let inner = self.lock();

        match inner.slot.get() {
            Ok(Some(raw)) => match Token::new(raw) {
                Ok(token) => return Some(token),
                Err(_) => tracing::debug!("token slot holds an empty value"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "token slot unreadable, trying cookie"),
        }

        let raw = inner.cookies.get(TOKEN_COOKIE)?;
        let token = Token::new(raw).ok()?;
        tracing::debug!("token recovered from legacy cookie");
        Some(token)
    }

    /// Makes `token` the current token, overwriting any previous one.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the slot can't be written. The previous
    /// value (if any) is then still in place.
    pub fn write(&self, token: &Token) -> Result<(), StoreError> {
        self.lock().slot.set(token.as_str())
    }

    /// Removes the token from the slot and expires the cookie mirror.
    ///
    /// The cookie is expired even if the slot removal fails, so at worst the
    /// slot keeps a stale value and the error says so.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the slot can't be cleared.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let removed = inner.slot.remove();
        inner.cookies.expire(TOKEN_COOKIE);
        removed
    }

    /// Renders the live legacy cookies as a `Cookie:` header value.
    pub fn cookie_header(&self) -> String {
        self.lock().cookies.header()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // No operation can leave `Inner` half-updated, so a poisoned lock
        // is still safe to use.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
