// --- File: crates/courtbook_client/src/client.rs ---
use courtbook_common::{append_query, client_from_config, join_url, HttpStatus};
use courtbook_config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::endpoints;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::session::SessionManager;

/// Authenticated client for the booking backend.
///
/// Attaches the session's bearer token to every request and, on a 401,
/// renews the access token once through the refresh endpoint before
/// re-issuing the request. Cloning is cheap; clones share the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Client for `base_url` with an in-memory session.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client described by the `[api]` configuration section, sharing `session`.
    pub fn from_config(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .timeout_secs(config.timeout_secs)
            .session(session);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Sends one logical request.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `endpoint` - Path relative to the base URL, e.g. `/courts/courts/`
    /// * `body` - Optional JSON body
    /// * `query` - Optional query parameters; falsy values are not sent
    ///
    /// # Returns
    ///
    /// The parsed JSON body (`None` when the body is empty or not JSON), or
    /// the normalized error. A 401 triggers at most one token refresh and
    /// one retry.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<Option<Value>, ApiError> {
        self.execute(&method, endpoint, body, query)
            .await
            .map_err(|err| {
                error!(
                    "{} {} failed (status: {:?}): {}",
                    method,
                    endpoint,
                    err.status(),
                    err
                );
                err
            })
    }

    /// [`request`](Self::request), deserializing the body into `T`.
    ///
    /// An absent body deserializes from JSON `null`, so `T` may be
    /// `Option<_>` or `()` for endpoints that answer with nothing.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<T, ApiError> {
        let value = self
            .request(method, endpoint, body, query)
            .await?
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<&QueryParams>,
    ) -> Result<Option<Value>, ApiError> {
        self.request(Method::GET, endpoint, None, query).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        self.request(Method::POST, endpoint, body, None).await
    }

    pub async fn put(&self, endpoint: &str, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        self.request(Method::PUT, endpoint, body, None).await
    }

    pub async fn patch(&self, endpoint: &str, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        self.request(Method::PATCH, endpoint, body, None).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Option<Value>, ApiError> {
        self.request(Method::DELETE, endpoint, None, None).await
    }

    /// Logs in and, when the payload carries both tokens, installs the session.
    ///
    /// Returns the full login payload.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let credentials = json!({ "email": email, "password": password });
        let payload = self
            .post(endpoints::LOGIN, Some(&credentials))
            .await?
            .unwrap_or(Value::Null);

        let access = payload.get("access").and_then(Value::as_str);
        let refresh = payload.get("refresh").and_then(Value::as_str);
        match (access, refresh) {
            (Some(access), Some(refresh)) => {
                self.session.establish(access, refresh, payload.get("user"))?;
                info!("Logged in as {}", email);
            }
            _ => warn!("Login response for {} carried no token pair", email),
        }
        Ok(payload)
    }

    /// Drops the local session. No network call is made.
    pub fn logout(&self) {
        self.session.clear();
        info!("Logged out");
    }

    pub fn current_user(&self) -> Option<Value> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    async fn execute(
        &self,
        method: &Method,
        endpoint: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(endpoint, query)?;

        let token = self.session.access_token();
        let (status, parsed) = self.send(method, &url, body, token.as_deref()).await?;
        if status != StatusCode::UNAUTHORIZED {
            return finish(status, parsed);
        }

        debug!("{} {} answered 401, attempting token refresh", method, endpoint);
        let fresh = self.recover(token.as_deref(), parsed).await?;

        // Second attempt; its own 401 is reported as-is.
        let (status, parsed) = self.send(method, &url, body, Some(&fresh)).await?;
        finish(status, parsed)
    }

    fn url(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<String, ApiError> {
        let url = join_url(&self.base_url, endpoint);
        match query {
            Some(query) => {
                let encoded = query
                    .to_query_string()
                    .map_err(|e| ApiError::validation(format!("invalid query parameters: {}", e)))?;
                Ok(append_query(&url, &encoded))
            }
            None => Ok(url),
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<(StatusCode, Option<Value>), ApiError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, serde_json::from_str(&text).ok()))
    }

    /// Obtains a usable access token after a 401.
    ///
    /// Holds the refresh gate for the whole exchange. A caller that finds
    /// the token already replaced by someone else reuses it instead of
    /// refreshing again. On any failure the session is cleared.
    async fn recover(&self, stale: Option<&str>, body: Option<Value>) -> Result<String, ApiError> {
        let _gate = self.session.refresh_gate().lock().await;

        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != stale {
                debug!("access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh) = self.session.refresh_token() else {
            self.session.clear();
            let rejected = ApiError::from_response(StatusCode::UNAUTHORIZED.as_u16(), body);
            return Err(ApiError::SessionExpired {
                message: rejected.message(),
                body: rejected.body().cloned(),
            });
        };

        match self.refresh_access(&refresh).await {
            Ok(access) => {
                self.session.replace_access_token(&access);
                info!("Access token refreshed");
                Ok(access)
            }
            Err(err) => {
                warn!("Token refresh failed, clearing session: {}", err);
                self.session.clear();
                Err(ApiError::SessionExpired {
                    message: err.message(),
                    body: err.body().cloned(),
                })
            }
        }
    }

    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError> {
        let url = join_url(&self.base_url, endpoints::REFRESH_TOKEN);
        let body = json!({ "refresh": refresh });
        let (status, parsed) = self.send(&Method::POST, &url, Some(&body), None).await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), parsed));
        }

        match parsed
            .as_ref()
            .and_then(|b| b.get("access"))
            .and_then(Value::as_str)
        {
            Some(access) if !access.is_empty() => Ok(access.to_string()),
            _ => Err(ApiError::Http {
                message: "Refresh response carried no access token".to_string(),
                status: status.as_u16(),
                body: parsed,
            }),
        }
    }
}

fn finish(status: StatusCode, body: Option<Value>) -> Result<Option<Value>, ApiError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::from_response(status.as_u16(), body))
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    session: Option<Arc<SessionManager>>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Shares an existing session instead of starting an in-memory one.
    pub fn session(mut self, session: Arc<SessionManager>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Configuration(format!(
                "base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ApiError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        let http = client_from_config(&ApiConfig {
            base_url: base_url.clone(),
            timeout_secs,
            user_agent: self.user_agent,
        })?;

        Ok(ApiClient {
            http,
            base_url,
            session: self
                .session
                .unwrap_or_else(|| Arc::new(SessionManager::in_memory())),
        })
    }
}
