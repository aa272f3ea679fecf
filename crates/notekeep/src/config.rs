//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notekeep_api::DEFAULT_BASE_URL;

/// File name of the token slot inside the state directory.
const SESSION_FILE: &str = "session.json";

/// Everything needed to build a [`Notekeep`](crate::Notekeep) client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use notekeep::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://notes.internal:5555")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url, "http://notes.internal:5555");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL. Default: `http://localhost:5555`.
    pub base_url: String,

    /// Directory holding the persisted token. Default: `.notekeep`.
    pub state_dir: PathBuf,

    /// Per-request timeout. Default: 10 seconds.
    pub timeout: Duration,

    /// A `Cookie` header to seed the cookie mirror with, for sessions that
    /// only ever lived in a browser cookie.
    pub cookie_header: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_dir: PathBuf::from(".notekeep"),
            timeout: Duration::from_secs(10),
            cookie_header: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cookie_header(mut self, header: impl Into<String>) -> Self {
        self.cookie_header = Some(header.into());
        self
    }

    /// Path of the token slot file.
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE)
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}
