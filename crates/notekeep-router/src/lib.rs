//! Routing for Notekeep: which view renders, and what chrome surrounds it.
//!
//! Everything here is a pure function of [`SessionState`] plus the current
//! path, except [`NavigationShell::activate_logout`], which hands off to the
//! session context.
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade / CLI (above)  ← navigate(path), submit forms
//!     ↕
//! Router (this crate)  ← Route table, guard decision, shell links
//!     ↕
//! Session (below)  ← SessionState, logout()
//! ```
//!
//! # Key types
//!
//! - [`Route`] — the known views and their paths
//! - [`decide`] / [`resolve`] — the route guard
//! - [`NavigationShell`] — top bar and sidebar
//!
//! [`SessionState`]: notekeep_session::SessionState

mod error;
mod guard;
mod route;
mod shell;

pub use error::RouteError;
pub use guard::{GuardDecision, Navigation, decide, resolve};
pub use route::Route;
pub use shell::{NavAction, NavLink, NavigationShell, shows_chrome};
