//! The navigation shell: top bar plus a slide-out sidebar.
//!
//! The shell is drawn around every view except the auth routes, and only
//! for an authenticated session. Its one piece of local state is whether
//! the sidebar is open. The logout link is the only link with a side
//! effect beyond navigation.

use notekeep_api::Backend;
use notekeep_session::{SessionContext, SessionError, SessionState};
use notekeep_store::Slot;

use crate::Route;

/// Whether the chrome surrounds `route` in `state`.
///
/// `None` (loading placeholder or not-found page) counts as a non-auth
/// route, so an authenticated user keeps the chrome there.
pub fn shows_chrome(state: &SessionState, route: Option<Route>) -> bool {
    state.is_authenticated() && !route.is_some_and(Route::is_auth_route)
}

/// What following a link does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Route),
    /// Log out, then land on `/login`.
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub action: NavAction,
}

impl NavLink {
    const fn go(label: &'static str, route: Route) -> Self {
        Self {
            label,
            action: NavAction::Go(route),
        }
    }

    /// The route this link lands on.
    pub fn target(&self) -> Route {
        match self.action {
            NavAction::Go(route) => route,
            NavAction::Logout => Route::Login,
        }
    }
}

const LOGO: NavLink = NavLink::go("MyApp", Route::Dashboard);
const ADD_NOTES: NavLink = NavLink::go("Add Notes", Route::AddNotes);
const SETTINGS: NavLink = NavLink::go("Settings", Route::Settings);

/// Top bar and sidebar.
#[derive(Debug, Default)]
pub struct NavigationShell {
    sidebar_open: bool,
}

impl NavigationShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// The always-visible top bar: logo and the "Add Notes" button.
    pub fn top_bar(&self) -> [NavLink; 2] {
        [LOGO, ADD_NOTES]
    }

    /// `Welcome <username>` when someone is logged in.
    pub fn greeting(&self, state: &SessionState) -> Option<String> {
        state.user().map(|user| format!("Welcome {}", user.username))
    }

    /// Sidebar links for `state`, in display order. Settings is always last.
    pub fn sidebar_links(&self, state: &SessionState) -> Vec<NavLink> {
        let mut links = if state.is_authenticated() {
            vec![
                NavLink::go("Dashboard", Route::Dashboard),
                NavLink::go("My Events", Route::AddEvents),
                NavLink {
                    label: "Logout",
                    action: NavAction::Logout,
                },
            ]
        } else {
            vec![
                NavLink::go("Login", Route::Login),
                NavLink::go("Register", Route::Register),
            ]
        };
        links.push(SETTINGS);
        links
    }

    /// Follows a plain navigation link: closes the sidebar and returns the
    /// destination.
    ///
    /// A logout link returns `None`; use [`activate_logout`](Self::activate_logout)
    /// for it so the session is actually ended.
    pub fn follow(&mut self, link: &NavLink) -> Option<Route> {
        match link.action {
            NavAction::Go(route) => {
                self.close_sidebar();
                Some(route)
            }
            NavAction::Logout => None,
        }
    }

    /// Activates the logout link: logs out, closes the sidebar, and returns
    /// [`Route::Login`] as the destination.
    ///
    /// # Errors
    /// Returns the logout error. Local session state is cleared and the
    /// sidebar closed even then, so the caller should still go to `/login`.
    pub async fn activate_logout<B: Backend, S: Slot>(
        &mut self,
        session: &SessionContext<B, S>,
    ) -> Result<Route, SessionError> {
        let result = session.logout().await;
        self.close_sidebar();
        result.map(|()| Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use notekeep_protocol::User;

    use super::*;

    fn alice() -> SessionState {
        SessionState::Authenticated(User::new("alice"))
    }

    fn labels(links: &[NavLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.label).collect()
    }

    // =========================================================================
    // shows_chrome()
    // =========================================================================

    #[test]
    fn test_shows_chrome_authenticated_protected_route() {
        assert!(shows_chrome(&alice(), Some(Route::Dashboard)));
    }

    #[test]
    fn test_shows_chrome_hidden_on_auth_routes() {
        assert!(!shows_chrome(&alice(), Some(Route::Login)));
        assert!(!shows_chrome(&alice(), Some(Route::Register)));
    }

    #[test]
    fn test_shows_chrome_hidden_when_not_authenticated() {
        assert!(!shows_chrome(&SessionState::Anonymous, Some(Route::Dashboard)));
        assert!(!shows_chrome(&SessionState::Unknown, None));
    }

    #[test]
    fn test_shows_chrome_authenticated_not_found_page() {
        assert!(shows_chrome(&alice(), None));
    }

    // =========================================================================
    // Sidebar
    // =========================================================================

    #[test]
    fn test_toggle_sidebar_flips_state() {
        let mut shell = NavigationShell::new();
        assert!(!shell.is_sidebar_open());
        shell.toggle_sidebar();
        assert!(shell.is_sidebar_open());
        shell.toggle_sidebar();
        assert!(!shell.is_sidebar_open());
    }

    #[test]
    fn test_sidebar_links_authenticated() {
        let shell = NavigationShell::new();
        assert_eq!(
            labels(&shell.sidebar_links(&alice())),
            ["Dashboard", "My Events", "Logout", "Settings"]
        );
    }

    #[test]
    fn test_sidebar_links_anonymous() {
        let shell = NavigationShell::new();
        assert_eq!(
            labels(&shell.sidebar_links(&SessionState::Anonymous)),
            ["Login", "Register", "Settings"]
        );
    }

    #[test]
    fn test_greeting_authenticated_names_user() {
        let shell = NavigationShell::new();
        assert_eq!(shell.greeting(&alice()).as_deref(), Some("Welcome alice"));
        assert_eq!(shell.greeting(&SessionState::Anonymous), None);
    }

    #[test]
    fn test_follow_go_link_closes_sidebar() {
        let mut shell = NavigationShell::new();
        shell.toggle_sidebar();
        let events = shell.sidebar_links(&alice())[1];

        assert_eq!(shell.follow(&events), Some(Route::AddEvents));
        assert!(!shell.is_sidebar_open());
    }

    #[test]
    fn test_follow_logout_link_is_not_plain_navigation() {
        let mut shell = NavigationShell::new();
        shell.toggle_sidebar();
        let logout = shell.sidebar_links(&alice())[2];

        assert_eq!(shell.follow(&logout), None);
        assert!(shell.is_sidebar_open());
        assert_eq!(logout.target(), Route::Login);
    }

    #[test]
    fn test_top_bar_links_to_dashboard_and_add_notes() {
        let shell = NavigationShell::new();
        let targets: Vec<_> = shell.top_bar().iter().map(NavLink::target).collect();
        assert_eq!(targets, [Route::Dashboard, Route::AddNotes]);
    }
}
