//! Session-token storage for Notekeep.
//!
//! The client keeps exactly one session token. It lives in two places:
//!
//! 1. **A persistent slot** ([`Slot`]) — the authoritative copy. The default
//!    [`FileSlot`] writes it to a small key-value file so it survives a
//!    restart; [`MemorySlot`] keeps it in memory for tests and throwaway
//!    clients.
//! 2. **A cookie mirror** ([`CookieMirror`]) — a legacy `token` cookie that
//!    is only ever read as a fallback, and expired on logout.
//!
//! [`TokenStore`] puts the two behind one small API with a fixed read
//! priority (slot first, then cookie), so nothing else in the workspace has
//! to know where a token came from.

mod cookies;
mod error;
mod slot;
mod store;

pub use cookies::CookieMirror;
pub use error::StoreError;
pub use slot::{FileSlot, MemorySlot, Slot};
pub use store::{TOKEN_COOKIE, TOKEN_KEY, TokenStore};
