//! `Notekeep` builder and application facade.
//!
//! This is the entry point for a front end. It owns the shared
//! [`SessionContext`], the navigation shell, and the current location, and
//! exposes the handful of things a user can actually do: open a path, submit
//! the login or registration form, and log out.

use std::sync::Arc;

use notekeep_api::{ApiConfig, Backend, HttpBackend};
use notekeep_protocol::{Credentials, Registration, User};
use notekeep_router::{Navigation, NavigationShell, Route, resolve};
use notekeep_session::{SessionContext, SessionState};
use notekeep_store::{CookieMirror, FileSlot, Slot, TOKEN_KEY, TokenStore};

use crate::{ClientConfig, NotekeepError};

/// Builder for configuring a [`Notekeep`] client.
///
/// # Example
///
/// ```rust,no_run
/// use notekeep::prelude::*;
///
/// # fn run() -> Result<(), NotekeepError> {
/// let app = Notekeep::builder()
///     .base_url("http://localhost:5555")
///     .state_dir(".notekeep")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct NotekeepBuilder {
    config: ClientConfig,
}

impl NotekeepBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn state_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.state_dir = dir.into();
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Seeds the cookie mirror from a `Cookie` header.
    pub fn cookies(mut self, header: &str) -> Self {
        self.config.cookie_header = Some(header.to_string());
        self
    }

    /// Builds the HTTP backend and the file-backed token store.
    ///
    /// Makes no network calls and doesn't touch the state directory; the
    /// session stays `Unknown` until [`Notekeep::start`].
    ///
    /// # Errors
    /// [`NotekeepError::Api`] if the base URL is unusable or the HTTP client
    /// can't be created.
    pub fn build(self) -> Result<Notekeep, NotekeepError> {
        let api = ApiConfig::parse(&self.config.base_url)?.with_timeout(self.config.timeout);
        let backend = HttpBackend::new(api)?;

        let slot = FileSlot::new(self.config.session_file(), TOKEN_KEY);
        let cookies = self
            .config
            .cookie_header
            .as_deref()
            .map(CookieMirror::parse)
            .unwrap_or_default();

        tracing::debug!(
            base_url = %self.config.base_url,
            state_dir = %self.config.state_dir.display(),
            "building client"
        );
        Ok(Notekeep::with_parts(backend, TokenStore::with_cookies(slot, cookies)))
    }
}

impl Default for NotekeepBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Notekeep client.
///
/// ```text
/// start(path) ──→ initialize() ──→ navigate(path)
///                                     │
///        submit_login ──→ /dashboard  │  guard: Render / Loading / Redirect
///        submit_registration ──→ /login
///        logout ──→ /login
/// ```
pub struct Notekeep<B: Backend = HttpBackend, S: Slot = FileSlot> {
    session: Arc<SessionContext<B, S>>,
    shell: NavigationShell,

    /// Last path navigated to (after redirects), re-resolved by `refresh`.
    path: String,
    current: Navigation,
}

impl Notekeep {
    /// Creates a new builder.
    pub fn builder() -> NotekeepBuilder {
        NotekeepBuilder::new()
    }
}

impl<B: Backend, S: Slot> Notekeep<B, S> {
    /// Assembles a client from an explicit backend and token store.
    pub fn with_parts(backend: B, store: TokenStore<S>) -> Self {
        Self::from_session(Arc::new(SessionContext::new(backend, store)))
    }

    /// Wraps an existing, possibly shared, session context.
    pub fn from_session(session: Arc<SessionContext<B, S>>) -> Self {
        Self {
            session,
            shell: NavigationShell::new(),
            path: Route::Register.path().to_string(),
            current: Navigation::Loading,
        }
    }

    /// The shared session context, for making authorized calls.
    pub fn session(&self) -> &Arc<SessionContext<B, S>> {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn shell(&self) -> &NavigationShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut NavigationShell {
        &mut self.shell
    }

    /// Where the last navigation ended up.
    pub fn current(&self) -> Navigation {
        self.current
    }

    /// The path currently shown (or awaited, while loading).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the top bar and sidebar are drawn around the current view.
    pub fn shows_chrome(&self) -> bool {
        notekeep_router::shows_chrome(&self.state(), self.current.landing())
    }

    /// Validates the stored session (once), then opens `path`.
    pub async fn start(&mut self, path: &str) -> Navigation {
        let state = self.session.initialize().await;
        tracing::info!(%state, "client started");
        self.navigate(path)
    }

    /// Opens `path` through the route guard.
    ///
    /// A redirect lands on its target, so [`path`](Self::path) becomes
    /// `/login`. While the session is still unknown the requested path is
    /// kept, and [`refresh`](Self::refresh) picks it up once resolved.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let nav = resolve(&self.session.state(), path);
        self.path = match nav {
            Navigation::Redirect(route) => route.path().to_string(),
            _ => path.to_string(),
        };
        self.current = nav;
        tracing::debug!(path, outcome = ?nav, "navigated");
        nav
    }

    /// Re-runs the guard for the current path after a state change.
    pub fn refresh(&mut self) -> Navigation {
        let path = self.path.clone();
        self.navigate(&path)
    }

    /// Submits the login form. On success goes to `/dashboard`; on failure
    /// stays on the current view.
    ///
    /// # Errors
    /// The session error; its `Display` is the message to show the user.
    pub async fn submit_login(&mut self, email: &str, password: &str) -> Result<User, NotekeepError> {
        let user = self.session.login(&Credentials::new(email, password)).await?;
        self.navigate(Route::Dashboard.path());
        Ok(user)
    }

    /// Submits the registration form. On success goes to `/login`; the new
    /// account is not logged in.
    ///
    /// # Errors
    /// The session error, e.g. `User already exists`.
    pub async fn submit_registration(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), NotekeepError> {
        self.session
            .register(&Registration::new(username, email, password))
            .await?;
        self.navigate(Route::Login.path());
        Ok(())
    }

    /// The sidebar's logout link: logs out, closes the sidebar, and goes to
    /// `/login`.
    ///
    /// # Errors
    /// The remote logout failure. The local session is cleared and the
    /// client is on `/login` regardless.
    pub async fn logout(&mut self) -> Result<(), NotekeepError> {
        let result = self.shell.activate_logout(&*self.session).await;
        self.navigate(Route::Login.path());
        result?;
        Ok(())
    }
}
