//! The session context: the single owner of session state and the token.
//!
//! Everything else in the client reads from here. Only [`login`],
//! [`logout`], and [`validate`] (plus [`invalidate`], which is a logout)
//! write the token store or change the state.
//!
//! # Sequencing
//!
//! Remote calls suspend, so operations can overlap: a logout can be clicked
//! while startup validation is still waiting on `/auth-check`. Each
//! operation takes a ticket from a monotonic counter when it starts, and its
//! result is committed only if no newer operation has started since. The
//! check and the commit happen under one lock, and the token store is
//! written inside that same critical section, so a stale result can never
//! overwrite a newer one.
//!
//! ```text
//! validate ──begin(1)────── /auth-check ─────────────→ ok, but latest=2 → discard
//! logout        ──begin(2)── /logout → commit(2) ✓ → Anonymous, token cleared
//! ```
//!
//! [`login`]: SessionContext::login
//! [`logout`]: SessionContext::logout
//! [`validate`]: SessionContext::validate
//! [`invalidate`]: SessionContext::invalidate

use std::sync::Mutex;

use notekeep_api::Backend;
use notekeep_protocol::{Credentials, LoginResponse, Registration, Token, User};
use notekeep_store::{FileSlot, Slot, TokenStore};
use tokio::sync::{OnceCell, watch};

use crate::{SessionError, SessionState};

/// Identifies one login/logout/validate attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

/// Application-lifetime session state.
///
/// Create one per application and share it (usually behind an `Arc`) with
/// every consumer. It is `Send + Sync`; all methods take `&self`.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ [Unknown] ──initialize()──→ [Anonymous] ⇄ [Authenticated]
///                                         login() / logout()
/// ```
pub struct SessionContext<B: Backend, S: Slot = FileSlot> {
    backend: B,
    store: TokenStore<S>,

    /// Current state. `watch` lets consumers await changes instead of polling.
    state: watch::Sender<SessionState>,

    /// The newest ticket handed out. Held while committing a result.
    latest: Mutex<u64>,

    /// Result of the one-and-only startup validation.
    startup: OnceCell<SessionState>,
}

impl<B: Backend, S: Slot> SessionContext<B, S> {
    /// Creates a context in the `Unknown` state. Makes no remote calls.
    pub fn new(backend: B, store: TokenStore<S>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            backend,
            store,
            state,
            latest: Mutex::new(0),
            startup: OnceCell::new(),
        }
    }

    /// The backend, for consumers that make their own authorized calls.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    ///
    /// Guards should re-evaluate whenever it fires rather than caching a
    /// decision.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The current token, if any. Straight passthrough to the token store.
    pub fn get_token(&self) -> Option<Token> {
        self.store.read()
    }

    /// `Bearer <token>` for the current token, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.get_token().map(|token| token.bearer())
    }

    /// Whether startup validation has completed.
    pub fn is_initialized(&self) -> bool {
        self.startup.initialized()
    }

    /// Runs startup validation exactly once per context.
    ///
    /// Later (or concurrent) calls wait for and return the first call's
    /// outcome without touching the backend again. The returned state is
    /// never `Unknown`.
    pub async fn initialize(&self) -> SessionState {
        self.startup
            .get_or_init(|| async {
                tracing::debug!("running startup session validation");
                self.validate().await
            })
            .await
            .clone()
    }

    /// Checks the stored token against `/auth-check`.
    ///
    /// - no token → `Anonymous`
    /// - backend returns a user → `Authenticated(user)`
    /// - anything else (network error, rejection, garbage body) → logs out
    ///   internally so the bad token is cleared, ending `Anonymous`
    ///
    /// Never returns an error. Returns the resolved state once no newer
    /// operation is still pending.
    pub async fn validate(&self) -> SessionState {
        let ticket = self.begin();

        let Some(token) = self.store.read() else {
            tracing::debug!("no stored token");
            self.commit(ticket, || self.set_state(SessionState::Anonymous));
            return self.settled().await;
        };

        match self.backend.auth_check(&token).await {
            Ok(user) => {
                let username = user.username.clone();
                let committed = self.commit(ticket, || {
                    self.set_state(SessionState::Authenticated(user));
                });
                match committed {
                    Some(()) => tracing::info!(%username, "stored session is valid"),
                    None => tracing::debug!("discarding stale session validation"),
                }
            }
            Err(e) => {
                let err = SessionError::from_api(e);
                match self.begin_if_current(ticket) {
                    Some(cleanup) => {
                        tracing::warn!(error = %err, "session validation failed, logging out");
                        if let Err(e) = self.logout_as(cleanup).await {
                            tracing::debug!(error = %e, "cleanup logout reported an error");
                        }
                    }
                    None => tracing::debug!(error = %err, "discarding stale validation failure"),
                }
            }
        }

        self.settled().await
    }

    /// Logs in with `credentials`.
    ///
    /// Any existing token is cleared first so a stale credential is never
    /// sent alongside the new login. On success the new token is stored and
    /// the state becomes `Authenticated`.
    ///
    /// # Errors
    /// - [`SessionError::ValidationFailure`] — the backend rejected the
    ///   credentials; displays the server's message
    /// - [`SessionError::NetworkFailure`] / [`SessionError::MalformedResponse`]
    /// - [`SessionError::Store`] — the token couldn't be persisted
    /// - [`SessionError::Superseded`] — a newer operation started meanwhile
    ///
    /// On every error path nothing is written and the state is unchanged
    /// (except that an unresolved `Unknown` settles to `Anonymous`).
    ///
    /// The old token is gone even when the login fails. A failed login from
    /// `Authenticated` therefore leaves that state in place with no token
    /// behind it; the next protected call gets a 401 and should report it
    /// through [`invalidate`](Self::invalidate).
    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        let ticket = self.begin();
        if let Err(e) = self.store.clear() {
            let err = SessionError::from(e);
            tracing::warn!(error = %err, "could not clear previous token, login aborted");
            self.settle_unknown(ticket);
            return Err(err);
        }

        tracing::debug!(email = %credentials.email, "logging in");
        let LoginResponse { token, user } = match self.backend.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                let err = SessionError::from_api(e);
                tracing::warn!(error = %err, "login failed");
                self.settle_unknown(ticket);
                return Err(err);
            }
        };

        let committed = self.commit(ticket, || {
            self.store.write(&token)?;
            self.set_state(SessionState::Authenticated(user.clone()));
            Ok::<(), SessionError>(())
        });

        match committed {
            None => {
                tracing::debug!("discarding stale login result");
                Err(SessionError::Superseded)
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "login succeeded remotely but token could not be stored");
                self.settle_unknown(ticket);
                Err(err)
            }
            Some(Ok(())) => {
                tracing::info!(username = %user.username, "logged in");
                Ok(user)
            }
        }
    }

    /// Logs out.
    ///
    /// With no token, local state is cleared immediately and the backend is
    /// not contacted. Otherwise `/logout` is called first, and the local
    /// token and state are cleared afterwards *whether or not* that call
    /// succeeded; the remote side is best-effort.
    ///
    /// # Errors
    /// Returns the remote failure (after local cleanup), or
    /// [`SessionError::Store`] if the token slot couldn't be cleared.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let ticket = self.begin();
        self.logout_as(ticket).await
    }

    async fn logout_as(&self, ticket: Ticket) -> Result<(), SessionError> {
        let Some(token) = self.store.read() else {
            tracing::debug!("no token, clearing local session only");
            return self.commit(ticket, || self.reset()).unwrap_or(Ok(()));
        };

        let remote = self
            .backend
            .logout(&token)
            .await
            .map_err(SessionError::from_api);
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "remote logout failed, clearing local session anyway");
        }

        match self.commit(ticket, || self.reset()) {
            Some(local) => local?,
            None => tracing::debug!("logout superseded, leaving newer session in place"),
        }

        remote?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Reports that a protected call was rejected with the current token.
    ///
    /// CRUD consumers call this on a 401. It logs out, which clears the
    /// token and drops the state to `Anonymous`.
    ///
    /// # Errors
    /// Same as [`logout`](Self::logout).
    pub async fn invalidate(&self) -> Result<(), SessionError> {
        tracing::warn!("protected call rejected the session token");
        self.logout().await
    }

    /// Creates an account. Does not log in and does not touch session state.
    ///
    /// # Errors
    /// [`SessionError::ValidationFailure`] with the server's message (e.g.
    /// `User already exists`), or a network/response error.
    pub async fn register(&self, registration: &Registration) -> Result<(), SessionError> {
        self.backend
            .register(registration)
            .await
            .map_err(SessionError::from_api)?;
        tracing::info!(username = %registration.username, "account registered");
        Ok(())
    }

    // -- Sequencing -------------------------------------------------------

    fn lock_latest(&self) -> std::sync::MutexGuard<'_, u64> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self) -> Ticket {
        let mut latest = self.lock_latest();
        *latest += 1;
        Ticket(*latest)
    }

    /// Takes the next ticket only if `ticket` is still the newest. The check
    /// and the bump share one lock, so no other operation can start between
    /// them.
    fn begin_if_current(&self, ticket: Ticket) -> Option<Ticket> {
        let mut latest = self.lock_latest();
        if *latest != ticket.0 {
            return None;
        }
        *latest += 1;
        Some(Ticket(*latest))
    }

    /// Runs `apply` only if `ticket` is still the newest, holding the
    /// sequencing lock throughout so no newer operation can begin midway.
    fn commit<T>(&self, ticket: Ticket, apply: impl FnOnce() -> T) -> Option<T> {
        let latest = self.lock_latest();
        if *latest != ticket.0 {
            return None;
        }
        let out = apply();
        drop(latest);
        Some(out)
    }

    // -- State ------------------------------------------------------------

    fn set_state(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::info!(from = %current, to = %next, "session state changed");
            *current = next;
            true
        });
    }

    /// Clears the token and drops to `Anonymous`.
    fn reset(&self) -> Result<(), SessionError> {
        let cleared = self.store.clear();
        self.set_state(SessionState::Anonymous);
        cleared.map_err(SessionError::from)
    }

    /// A failed login has no session to show; don't leave `Unknown` behind.
    fn settle_unknown(&self, ticket: Ticket) {
        self.commit(ticket, || {
            self.state.send_if_modified(|current| {
                if current.is_resolved() {
                    return false;
                }
                tracing::info!(from = %current, to = "anonymous", "session state changed");
                *current = SessionState::Anonymous;
                true
            })
        });
    }

    /// Waits until the state is resolved (a newer pending operation may
    /// still owe a result) and returns it.
    async fn settled(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(SessionState::is_resolved).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use notekeep_api::ApiError;
    use notekeep_protocol::Endpoint;
    use notekeep_store::MemorySlot;

    use super::*;

    /// Every call fails; these tests never reach the backend.
    struct Offline;

    fn offline(endpoint: Endpoint) -> ApiError {
        ApiError::Network {
            endpoint,
            reason: "offline".into(),
        }
    }

    impl Backend for Offline {
        async fn login(&self, _: &Credentials) -> Result<LoginResponse, ApiError> {
            Err(offline(Endpoint::Login))
        }

        async fn logout(&self, _: &Token) -> Result<(), ApiError> {
            Err(offline(Endpoint::Logout))
        }

        async fn auth_check(&self, _: &Token) -> Result<User, ApiError> {
            Err(offline(Endpoint::AuthCheck))
        }

        async fn register(&self, _: &Registration) -> Result<(), ApiError> {
            Err(offline(Endpoint::Register))
        }
    }

    fn context() -> SessionContext<Offline, MemorySlot> {
        SessionContext::new(Offline, TokenStore::new(MemorySlot::new()))
    }

    // =========================================================================
    // begin_if_current()
    // =========================================================================

    #[test]
    fn test_begin_if_current_newest_ticket_takes_next() {
        let ctx = context();
        let first = ctx.begin();

        let next = ctx.begin_if_current(first);

        assert_eq!(next, Some(Ticket(first.0 + 1)));
        assert_eq!(ctx.commit(first, || ()), None, "old ticket is now stale");
    }

    #[test]
    fn test_begin_if_current_stale_ticket_takes_nothing() {
        let ctx = context();
        let stale = ctx.begin();
        let newer = ctx.begin();

        assert_eq!(ctx.begin_if_current(stale), None);
        assert_eq!(ctx.commit(newer, || ()), Some(()), "newer ticket still owns the state");
    }
}
