//! Backend abstraction for the Notekeep auth API.
//!
//! Provides the [`Backend`] trait, which describes the four remote auth
//! operations the session layer depends on, and [`HttpBackend`], the
//! implementation that talks to the real server.
//!
//! The session layer only ever sees the trait, so tests can swap in an
//! in-process mock without standing up a server.
//!
//! # Feature Flags
//!
//! - `http` (default) — [`HttpBackend`] via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::ApiError;
#[cfg(feature = "http")]
pub use http::{ApiConfig, DEFAULT_BASE_URL, HttpBackend};
#[cfg(feature = "http")]
pub use reqwest::Method;

use std::future::Future;
use std::sync::Arc;

use notekeep_protocol::{Credentials, LoginResponse, Registration, Token, User};

/// The remote side of authentication.
///
/// Each method is one endpoint call. Implementations report every
/// non-success answer as an [`ApiError`]; they never retry and never touch
/// local state. Deciding what a failure *means* (bad password, expired
/// session, server down) is the session layer's job.
///
/// # Trait bounds
///
/// - `Send + Sync` → one backend is shared by every task holding the
///   session context.
/// - `'static` → it lives as long as the application.
pub trait Backend: Send + Sync + 'static {
    /// `POST /login`: exchanges credentials for a token and user record.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// `POST /logout`: asks the server to revoke `token`.
    fn logout(&self, token: &Token) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /auth-check`: returns the user `token` belongs to.
    ///
    /// Only a 200 counts as success; any other status means the session
    /// is not valid.
    fn auth_check(&self, token: &Token) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// `POST /register`: creates an account. Only a 201 counts as success.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Lets callers keep a handle on a backend they hand to the session layer.
impl<B: Backend> Backend for Arc<B> {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send {
        (**self).login(credentials)
    }

    fn logout(&self, token: &Token) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).logout(token)
    }

    fn auth_check(&self, token: &Token) -> impl Future<Output = Result<User, ApiError>> + Send {
        (**self).auth_check(token)
    }

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).register(registration)
    }
}
