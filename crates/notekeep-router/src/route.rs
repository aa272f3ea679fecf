//! The route table.

use std::fmt;
use std::str::FromStr;

use crate::RouteError;

/// A view the client knows how to show.
///
/// `Login` and `Register` are the *auth routes*: always reachable, and the
/// navigation chrome is hidden on them. Everything else is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    /// The landing page doubles as the registration form.
    Register,
    Dashboard,
    AddNotes,
    AddEvents,
    Settings,
}

impl Route {
    /// Every route, in sidebar order.
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::AddNotes,
        Route::AddEvents,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/",
            Route::Dashboard => "/dashboard",
            Route::AddNotes => "/addnotes",
            Route::AddEvents => "/addevents",
            Route::Settings => "/settings",
        }
    }

    /// Looks up the route for a browser-style path.
    ///
    /// A query string or fragment is ignored, as is one trailing slash, so
    /// `/dashboard/?tab=week#today` is `Dashboard`. Returns `None` for
    /// unknown paths.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        let path = if path.is_empty() { "/" } else { path };

        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Requires an authenticated session to render.
    pub fn is_protected(self) -> bool {
        !self.is_auth_route()
    }

    /// Login or registration: the chrome is hidden here.
    pub fn is_auth_route(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| RouteError::NotFound(s.to_string()))
    }
}
