//! # Notekeep
//!
//! Session-aware client for the Notekeep notes and calendar backend.
//!
//! Notekeep keeps one session token on disk, validates it once at startup,
//! and decides for every navigation whether the requested view may render,
//! must wait, or must bounce to the login page. The sub-crates do the work;
//! this crate wires them together behind [`Notekeep`].
//!
//! ```text
//! Notekeep (this crate)
//!   ├── notekeep-router   Route, guard, navigation shell
//!   ├── notekeep-session  SessionContext, SessionState
//!   ├── notekeep-api      Backend trait, HttpBackend
//!   ├── notekeep-store    TokenStore (file slot + cookie mirror)
//!   └── notekeep-protocol wire types
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notekeep::prelude::*;
//!
//! # async fn run() -> Result<(), NotekeepError> {
//! let mut app = Notekeep::builder()
//!     .base_url("http://localhost:5555")
//!     .state_dir("/tmp/notekeep")
//!     .build()?;
//!
//! app.start("/dashboard").await;
//! app.submit_login("alice@x.com", "wonderland").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{Notekeep, NotekeepBuilder};
pub use config::ClientConfig;
pub use error::NotekeepError;

pub use notekeep_api as api;
pub use notekeep_protocol as protocol;
pub use notekeep_router as router;
pub use notekeep_session as session;
pub use notekeep_store as store;

/// The types most callers need.
pub mod prelude {
    pub use crate::{ClientConfig, Notekeep, NotekeepBuilder, NotekeepError};
    pub use notekeep_api::{ApiConfig, Backend, HttpBackend};
    pub use notekeep_protocol::{Credentials, Registration, Token, User};
    pub use notekeep_router::{Navigation, NavigationShell, Route};
    pub use notekeep_session::{SessionContext, SessionError, SessionState};
    pub use notekeep_store::{FileSlot, MemorySlot, TokenStore};
}
