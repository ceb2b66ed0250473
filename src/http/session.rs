//! Tenant session implementation
//!
//! The session is an explicit, explicitly-passed object. It holds the
//! mutable auth headers that `login` installs, so one logical caller owns
//! it at a time; the other verbs only read shared state.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info};

/// Relative path of the tenant login endpoint
const LOGIN_PATH: &str = "api/v1/core/user/login/";

/// Relative path of the deployment healthcheck endpoint
const HEALTHCHECK_PATH: &str = "healthcheck/";

/// Configuration for a tenant session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the tenant deployment
    pub base_url: String,
    /// Verify TLS certificates (disabled only against lab tenants)
    pub verify_tls: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers sent on every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl SessionConfig {
    /// Create a config with the standard JSON headers
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Content-Type".to_string(),
            "application/json;charset=UTF-8".to_string(),
        );

        Self {
            base_url: base_url.into(),
            verify_tls: true,
            timeout: Duration::from_secs(30),
            default_headers,
            user_agent: format!("aegis-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a config builder
    pub fn builder(base_url: impl Into<String>) -> SessionConfigBuilder {
        SessionConfigBuilder {
            config: Self::new(base_url),
        }
    }
}

/// Builder for session config
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the TLS-verification policy
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.verify_tls = verify;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

/// Outcome of a login attempt.
///
/// Carries the raw status and body so callers can inspect failures
/// themselves; a failed login is not an error.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// HTTP status of the login request
    pub status: StatusCode,
    /// Response body, as JSON when the server sent JSON
    pub body: JsonValue,
}

impl LoginResponse {
    /// True when the login was accepted
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Authenticated session against one tenant deployment
pub struct ApiSession {
    client: Client,
    config: SessionConfig,
    auth_headers: HashMap<String, String>,
    username: Option<String>,
}

impl ApiSession {
    /// Create an unauthenticated session with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(SessionConfig::new(base_url))
    }

    /// Create an unauthenticated session with custom configuration
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            auth_headers: HashMap::new(),
            username: None,
        })
    }

    /// Base URL this session talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Username of the logged-in user, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether login has installed auth headers on this session
    pub fn is_authenticated(&self) -> bool {
        !self.auth_headers.is_empty()
    }

    /// Log in and install the server-issued session headers.
    ///
    /// On a 200 the `csrf` token and `session.id` from the body become the
    /// `x-csrftoken`, `Cookie`, `Authorization` and `Referer` headers of all
    /// later requests. Any other status is logged and handed back through the
    /// returned [`LoginResponse`] without erroring; callers check the status
    /// explicitly.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = json!({ "username": username, "password": password });
        let response = self.request(Method::POST, LOGIN_PATH, Some(&body)).await?;
        let status = response.status();

        if status != StatusCode::OK {
            error!(
                "login to {} as {username} failed with status {status}",
                self.config.base_url
            );
            let text = response.text().await.map_err(Error::Http)?;
            let body = serde_json::from_str(&text).unwrap_or(JsonValue::String(text));
            return Ok(LoginResponse { status, body });
        }

        let body: JsonValue = response.json().await.map_err(Error::Http)?;
        let csrf = body
            .get("csrf")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::auth("login response missing csrf token"))?;
        let session_id = match body.pointer("/session/id") {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => return Err(Error::auth("login response missing session id")),
        };

        self.auth_headers
            .insert("x-csrftoken".to_string(), csrf.to_string());
        self.auth_headers.insert(
            "Cookie".to_string(),
            format!("csrftoken={csrf}; sessionid={session_id}"),
        );
        self.auth_headers
            .insert("Authorization".to_string(), format!("session {session_id}"));
        self.auth_headers
            .insert("Referer".to_string(), self.config.base_url.clone());
        self.username = Some(username.to_string());

        info!("logged in to {} as {username}", self.config.base_url);
        Ok(LoginResponse { status, body })
    }

    /// Make a GET request to a path below the base URL
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.request(Method::GET, path, None).await
    }

    /// Make a GET request to an already-absolute URL.
    ///
    /// Used for pagination cursors, which carry the base URL themselves.
    pub async fn get_absolute(&self, url: &str) -> Result<Response> {
        debug!("GET {url}");
        let req = self.apply_headers(self.client.get(url));
        req.send().await.map_err(Error::Http)
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &JsonValue) -> Result<Response> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, path: &str, body: &JsonValue) -> Result<Response> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, path: &str, body: &JsonValue) -> Result<Response> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.request(Method::DELETE, path, None).await
    }

    /// Make a generic request.
    ///
    /// Only transport failures are errors; HTTP status codes come back in the
    /// response for the caller to inspect.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<Response> {
        let url = self.build_url(path);
        debug!("{method} {url}");

        let mut req = self.apply_headers(self.client.request(method, &url));
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(Error::Http)
    }

    /// Probe the deployment healthcheck endpoint.
    ///
    /// The deployment answers a bare `OK` body when it can take traffic;
    /// anything else is surfaced as an `HttpStatus` error.
    pub async fn healthcheck(&self) -> Result<()> {
        let response = self.get(HEALTHCHECK_PATH).await?;
        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;
        if status != StatusCode::OK || body != "OK" {
            return Err(Error::http_status(status.as_u16(), body));
        }
        Ok(())
    }

    fn apply_headers(&self, mut req: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &self.auth_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req
    }

    /// Build the full URL for a path; absolute URLs pass through untouched
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSession")
            .field("base_url", &self.config.base_url)
            .field("username", &self.username)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
