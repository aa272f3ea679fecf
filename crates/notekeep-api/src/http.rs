//! [`HttpBackend`]: the [`Backend`] that talks to the real server.

use std::time::Duration;

use notekeep_protocol::{
    AuthCheckResponse, Credentials, Endpoint, ErrorBody, LoginResponse, Registration, Token,
    User, decode_body, encode_body,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use url::Url;

use crate::{ApiError, Backend};

/// Where the reference backend listens during development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5555";

/// Connection settings for [`HttpBackend`].
///
/// ```rust
/// use std::time::Duration;
/// use notekeep_api::ApiConfig;
///
/// let config = ApiConfig::parse("https://notes.example.com/api")?
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url().as_str(), "https://notes.example.com/api/");
/// # Ok::<(), notekeep_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a config for the given base URL with the default timeout.
    ///
    /// The base path always gets a trailing slash, so endpoint paths are
    /// resolved *under* it (`/api` + `/login` → `/api/login`), not on top of it.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// Parses `base_url` and creates a config for it.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the URL doesn't parse or can't be a base.
    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("{base_url}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{base_url}: not a base URL")));
        }
        Ok(Self::new(url))
    }

    /// Overrides the per-request timeout (default: 10 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("valid default URL"))
    }
}

/// Talks to the Notekeep backend over HTTP.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` around a connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ApiConfig,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Creates a backend with its own connection pool.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the HTTP client can't be built
    /// (e.g. no TLS backend available).
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolves `path` (e.g. `/notes/3/pin`) against the base URL.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the result isn't a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("{path}: {e}")))
    }

    /// Starts a request to any backend path with the bearer header attached.
    ///
    /// This is how the notes, tags, calendar, and settings endpoints are
    /// reached: they all authenticate with the same session token.
    ///
    /// ```rust,ignore
    /// let token = session.get_token().ok_or(MyError::LoggedOut)?;
    /// let notes = backend
    ///     .authorized(Method::GET, "/notes", &token)?
    ///     .send()
    ///     .await?;
    /// ```
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if `path` doesn't resolve to a URL.
    pub fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &Token,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, token.bearer()))
    }

    fn request(&self, endpoint: Endpoint, token: Option<&Token>) -> Result<RequestBuilder, ApiError> {
        let method = match endpoint.method() {
            "GET" => Method::GET,
            _ => Method::POST,
        };
        match token {
            Some(token) => self.authorized(method, endpoint.path(), token),
            None => Ok(self.http.request(method, self.url(endpoint.path())?)),
        }
    }

    fn with_json<T: Serialize>(
        endpoint: Endpoint,
        request: RequestBuilder,
        body: &T,
    ) -> Result<RequestBuilder, ApiError> {
        let bytes =
            encode_body(body).map_err(|source| ApiError::Protocol { endpoint, source })?;
        Ok(request.header(CONTENT_TYPE, "application/json").body(bytes))
    }

    /// Sends `request` and reads the whole body.
    async fn exchange(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let network = |e: reqwest::Error| ApiError::Network {
            endpoint,
            reason: e.to_string(),
        };

        tracing::debug!(%endpoint, "sending request");
        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network)?;
        tracing::debug!(%endpoint, status = status.as_u16(), "response received");

        Ok((status, body.to_vec()))
    }
}

/// Builds the error for a non-success answer, keeping the server's message.
fn status_error(endpoint: Endpoint, status: StatusCode, body: &[u8]) -> ApiError {
    let message = decode_body::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    ApiError::Status {
        endpoint,
        status: status.as_u16(),
        message,
    }
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T, ApiError> {
    decode_body(body).map_err(|source| ApiError::Protocol { endpoint, source })
}

impl Backend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let endpoint = Endpoint::Login;
        let request = Self::with_json(endpoint, self.request(endpoint, None)?, credentials)?;

        let (status, body) = self.exchange(endpoint, request).await?;
        if !status.is_success() {
            return Err(status_error(endpoint, status, &body));
        }
        decode(endpoint, &body)
    }

    async fn logout(&self, token: &Token) -> Result<(), ApiError> {
        let endpoint = Endpoint::Logout;
        let request = self.request(endpoint, Some(token))?;

        let (status, body) = self.exchange(endpoint, request).await?;
        if !status.is_success() {
            return Err(status_error(endpoint, status, &body));
        }
        Ok(())
    }

    async fn auth_check(&self, token: &Token) -> Result<User, ApiError> {
        let endpoint = Endpoint::AuthCheck;
        let request = self.request(endpoint, Some(token))?;

        let (status, body) = self.exchange(endpoint, request).await?;
        if status != StatusCode::OK {
            return Err(status_error(endpoint, status, &body));
        }
        let AuthCheckResponse { user } = decode(endpoint, &body)?;
        Ok(user)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let endpoint = Endpoint::Register;
        let request = Self::with_json(endpoint, self.request(endpoint, None)?, registration)?;

        let (status, body) = self.exchange(endpoint, request).await?;
        if status != StatusCode::CREATED {
            return Err(status_error(endpoint, status, &body));
        }
        Ok(())
    }
}
