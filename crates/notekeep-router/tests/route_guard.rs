//! Guard and shell behaviour driven by a real `SessionContext`.

use notekeep_api::{ApiError, Backend};
use notekeep_protocol::{Credentials, Endpoint, LoginResponse, Registration, Token, User};
use notekeep_router::{Navigation, NavigationShell, Route, resolve, shows_chrome};
use notekeep_session::{SessionContext, SessionState};
use notekeep_store::{MemorySlot, TokenStore};

/// Accepts exactly one token and one set of credentials.
struct StubBackend;

const VALID: &str = "tok-valid";

impl Backend for StubBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        if credentials.password == "wonderland" {
            Ok(LoginResponse {
                token: Token::new(VALID).unwrap(),
                user: User::new("alice"),
            })
        } else {
            Err(ApiError::Status {
                endpoint: Endpoint::Login,
                status: 401,
                message: Some("invalid credentials".into()),
            })
        }
    }

    async fn logout(&self, _token: &Token) -> Result<(), ApiError> {
        Ok(())
    }

    async fn auth_check(&self, token: &Token) -> Result<User, ApiError> {
        if token.as_str() == VALID {
            Ok(User::new("alice"))
        } else {
            Err(ApiError::Status {
                endpoint: Endpoint::AuthCheck,
                status: 401,
                message: Some("Token has expired!".into()),
            })
        }
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        Ok(())
    }
}

fn session(slot: MemorySlot) -> SessionContext<StubBackend, MemorySlot> {
    SessionContext::new(StubBackend, TokenStore::new(slot))
}

// =========================================================================
// Startup scenarios
// =========================================================================

#[tokio::test]
async fn test_no_token_dashboard_redirects_to_login() {
    let ctx = session(MemorySlot::new());

    assert_eq!(resolve(&ctx.state(), "/dashboard"), Navigation::Loading);

    ctx.initialize().await;

    assert_eq!(resolve(&ctx.state(), "/dashboard"), Navigation::Redirect(Route::Login));
    assert_eq!(resolve(&ctx.state(), "/login"), Navigation::Render(Route::Login));
}

#[tokio::test]
async fn test_valid_token_dashboard_renders_with_chrome() {
    let ctx = session(MemorySlot::with_value(VALID));

    ctx.initialize().await;
    let state = ctx.state();

    assert_eq!(resolve(&state, "/dashboard"), Navigation::Render(Route::Dashboard));
    assert!(shows_chrome(&state, Some(Route::Dashboard)));
    assert_eq!(
        NavigationShell::new().greeting(&state).as_deref(),
        Some("Welcome alice")
    );
}

#[tokio::test]
async fn test_expired_token_dashboard_redirects_to_login() {
    let ctx = session(MemorySlot::with_value("tok-expired"));

    ctx.initialize().await;

    assert_eq!(ctx.state(), SessionState::Anonymous);
    assert_eq!(resolve(&ctx.state(), "/addnotes"), Navigation::Redirect(Route::Login));
}

// =========================================================================
// Re-evaluation on state change
// =========================================================================

#[tokio::test]
async fn test_guard_follows_login_and_logout() {
    let ctx = session(MemorySlot::new());
    ctx.initialize().await;
    let mut rx = ctx.subscribe();
    rx.mark_unchanged();

    ctx.login(&Credentials::new("alice@x.com", "wonderland")).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        resolve(&rx.borrow_and_update(), "/settings"),
        Navigation::Render(Route::Settings)
    );

    ctx.logout().await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        resolve(&rx.borrow_and_update(), "/settings"),
        Navigation::Redirect(Route::Login)
    );
}

// =========================================================================
// Logout link
// =========================================================================

#[tokio::test]
async fn test_activate_logout_clears_session_and_lands_on_login() {
    let ctx = session(MemorySlot::with_value(VALID));
    ctx.initialize().await;
    let mut shell = NavigationShell::new();
    shell.toggle_sidebar();

    let landing = shell.activate_logout(&ctx).await.unwrap();

    assert_eq!(landing, Route::Login);
    assert!(!shell.is_sidebar_open());
    assert_eq!(ctx.state(), SessionState::Anonymous);
    assert_eq!(ctx.get_token(), None);
    assert!(!shows_chrome(&ctx.state(), Some(landing)));
}
