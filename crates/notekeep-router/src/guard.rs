//! The route guard.
//!
//! Pure functions of the session state and the requested route. Callers
//! re-run them whenever either changes; nothing here caches a decision.
//!
//! ```text
//!                  protected route        public route
//! Unknown          Loading                Loading
//! Anonymous        RedirectToLogin        Render
//! Authenticated    Render                 Render
//! ```

use notekeep_session::SessionState;

use crate::Route;

/// What the guard wants done with a requested view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Startup validation hasn't finished; show a placeholder.
    Loading,
    RedirectToLogin,
}

/// Decides whether a view may render for the current session state.
pub fn decide(state: &SessionState, is_protected: bool) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Loading,
        SessionState::Anonymous if is_protected => GuardDecision::RedirectToLogin,
        SessionState::Anonymous | SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

/// Where a navigation to some path ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Loading,
    Redirect(Route),
    NotFound,
}

impl Navigation {
    /// The route actually on screen, if any.
    pub fn landing(self) -> Option<Route> {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => Some(route),
            Navigation::Loading | Navigation::NotFound => None,
        }
    }
}

/// Resolves a path through the route table and the guard.
pub fn resolve(state: &SessionState, path: &str) -> Navigation {
    let Some(route) = Route::parse(path) else {
        tracing::debug!(path, "no route matches");
        return Navigation::NotFound;
    };

    match decide(state, route.is_protected()) {
        GuardDecision::Render => Navigation::Render(route),
        GuardDecision::Loading => Navigation::Loading,
        GuardDecision::RedirectToLogin => {
            tracing::debug!(%route, "protected route, redirecting to login");
            Navigation::Redirect(Route::Login)
        }
    }
}

#[cfg(test)]
mod tests {
    use notekeep_protocol::User;

    use super::*;

    fn alice() -> SessionState {
        SessionState::Authenticated(User::new("alice"))
    }

    // =========================================================================
    // decide()
    // =========================================================================

    #[test]
    fn test_decide_unknown_is_loading_either_way() {
        assert_eq!(decide(&SessionState::Unknown, true), GuardDecision::Loading);
        assert_eq!(decide(&SessionState::Unknown, false), GuardDecision::Loading);
    }

    #[test]
    fn test_decide_anonymous_protected_redirects() {
        assert_eq!(decide(&SessionState::Anonymous, true), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_decide_anonymous_public_renders() {
        assert_eq!(decide(&SessionState::Anonymous, false), GuardDecision::Render);
    }

    #[test]
    fn test_decide_authenticated_renders_either_way() {
        assert_eq!(decide(&alice(), true), GuardDecision::Render);
        assert_eq!(decide(&alice(), false), GuardDecision::Render);
    }

    // =========================================================================
    // resolve()
    // =========================================================================

    #[test]
    fn test_resolve_anonymous_dashboard_redirects_to_login() {
        let nav = resolve(&SessionState::Anonymous, "/dashboard");
        assert_eq!(nav, Navigation::Redirect(Route::Login));
        assert_eq!(nav.landing(), Some(Route::Login));
    }

    #[test]
    fn test_resolve_authenticated_dashboard_renders() {
        assert_eq!(resolve(&alice(), "/dashboard/"), Navigation::Render(Route::Dashboard));
    }

    #[test]
    fn test_resolve_unknown_state_is_loading() {
        assert_eq!(resolve(&SessionState::Unknown, "/login"), Navigation::Loading);
    }

    #[test]
    fn test_resolve_unknown_path_is_not_found() {
        assert_eq!(resolve(&alice(), "/nope"), Navigation::NotFound);
        assert_eq!(Navigation::NotFound.landing(), None);
    }
}
