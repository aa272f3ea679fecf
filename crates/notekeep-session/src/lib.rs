//! Session management for Notekeep.
//!
//! This crate owns the one piece of shared state the client has: who the
//! current user is. It handles:
//!
//! 1. **Startup validation** — checking a stored token against the backend
//!    once per application lifetime ([`SessionContext::initialize`])
//! 2. **Login / logout** — the only operations that write or clear the token
//! 3. **Change notification** — consumers subscribe to [`SessionState`] and
//!    re-evaluate their guards on every change
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)  ← reads SessionState to guard routes and draw the shell
//!     ↕
//! Session (this crate)  ← owns SessionState and the token lifecycle
//!     ↕
//! Api + Store (below)  ← remote calls, persistent token slot
//! ```

mod context;
mod error;
mod state;

pub use context::SessionContext;
pub use error::SessionError;
pub use state::SessionState;
