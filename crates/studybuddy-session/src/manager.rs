//! Session Manager
//!
//! Owns the session state and the HTTP client. Clones share state, so every
//! page holds its own handle while reading the same user and token.

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use studybuddy_storage::{LocalStorage, TOKEN_KEY};

use crate::error::SessionError;
use crate::notice::Notifier;
use crate::request::RequestOptions;
use crate::session::{RegisterRequest, Session, User};
use crate::Result;

const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix every endpoint is appended to, e.g. `http://localhost:5000/api`
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: User,
}

pub struct SessionManager {
    state: Arc<RwLock<Session>>,
    storage: LocalStorage,
    http: reqwest::Client,
    config: Arc<ApiConfig>,
    notifier: Notifier,
}

impl SessionManager {
    /// Build the manager from persisted state. A stored token leaves the
    /// session pending until [`SessionManager::initialize`] verifies it.
    pub fn new(config: ApiConfig, storage: LocalStorage) -> Result<Self> {
        let token = storage.get_item(TOKEN_KEY)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("studybuddy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            state: Arc::new(RwLock::new(Session::new(token))),
            storage,
            http,
            config: Arc::new(config),
            notifier: Notifier::new(),
        })
    }

    /// Verify the stored token, once. A rejected token is discarded.
    pub async fn initialize(&self) -> Result<Option<User>> {
        if self.token().is_none() {
            self.state.write().loading = false;
            return Ok(None);
        }

        match self
            .request_as::<VerifyResponse>("/auth/verify-token", RequestOptions::post_empty())
            .await
        {
            Ok(VerifyResponse { user }) => {
                {
                    let mut state = self.state.write();
                    state.user = Some(user.clone());
                    state.loading = false;
                }

                tracing::info!(user_id = user.id, username = %user.username, "Restored session");

                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token verification failed");

                self.state.write().sign_out();
                self.storage.remove_item(TOKEN_KEY)?;

                Ok(None)
            }
        }
    }

    /// Call an API endpoint and return the decoded JSON body.
    ///
    /// Sends `Content-Type: application/json` and, when signed in, the bearer
    /// token. Any non-success status becomes [`SessionError::Api`] carrying
    /// the server's `error` message.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let headers = self.build_headers(&options)?;

        let mut builder = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(method = %options.method, endpoint = %endpoint, "API request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(endpoint = %endpoint, error = %e, "API call failed");
            SessionError::Network(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let data = if text.trim().is_empty() {
            Some(Value::Null)
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        if !status.is_success() {
            let message = data
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_ERROR_MESSAGE)
                .to_string();

            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                message = %message,
                "API call failed"
            );

            return Err(SessionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        data.ok_or_else(|| {
            tracing::error!(endpoint = %endpoint, "API returned a non-JSON body");
            SessionError::InvalidResponse(format!("{endpoint} returned a non-JSON body"))
        })
    }

    /// [`SessionManager::request`], decoded into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let data = self.request(endpoint, options).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// [`SessionManager::request`], decoding one top-level field of the
    /// response envelope (e.g. `rooms` in `{"rooms": [...]}`)
    pub async fn request_field<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        field: &str,
    ) -> Result<T> {
        let mut data = self.request(endpoint, options).await?;
        let value = data.get_mut(field).map(Value::take).ok_or_else(|| {
            SessionError::InvalidResponse(format!("missing `{field}` in {endpoint} response"))
        })?;
        Ok(serde_json::from_value(value)?)
    }

    fn build_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| SessionError::InvalidHeader(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SessionError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SessionError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = json!({ "email": email, "password": password });
        let result = self
            .request_as::<AuthResponse>("/auth/login", RequestOptions::post(body))
            .await
            .and_then(|auth| self.establish(auth));

        match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Logged in");
                self.notifier.success("Login successful!");
                Ok(user)
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let body = serde_json::to_value(request)?;
        let result = self
            .request_as::<AuthResponse>("/auth/register", RequestOptions::post(body))
            .await
            .and_then(|auth| self.establish(auth));

        match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Registered");
                self.notifier.success("Registration successful!");
                Ok(user)
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    fn establish(&self, auth: AuthResponse) -> Result<User> {
        if auth.token.trim().is_empty() {
            return Err(SessionError::InvalidResponse(
                "authentication response carried an empty token".to_string(),
            ));
        }

        self.storage.set_item(TOKEN_KEY, &auth.token)?;
        self.state.write().sign_in(auth.token, auth.user.clone());
        Ok(auth.user)
    }

    /// Drop the session locally. The backend is not contacted.
    pub fn logout(&self) -> Result<()> {
        self.state.write().sign_out();
        self.storage.remove_item(TOKEN_KEY)?;

        tracing::info!("Logged out");
        self.notifier.success("Logged out successfully");

        Ok(())
    }

    /// Shallow-merge `partial` into the current user. Local only; returns
    /// `None` when nobody is signed in.
    pub fn update_user(&self, partial: Value) -> Result<Option<User>> {
        let Value::Object(changes) = partial else {
            return Err(SessionError::InvalidUpdate(
                "expected a JSON object".to_string(),
            ));
        };

        let mut state = self.state.write();
        let Some(user) = state.user.as_ref() else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(user)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(changes);
        }
        let updated: User = serde_json::from_value(merged)?;
        state.user = Some(updated.clone());

        Ok(Some(updated))
    }

    pub fn session(&self) -> Session {
        self.state.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            storage: self.storage.clone(),
            http: self.http.clone(),
            config: Arc::clone(&self.config),
            notifier: self.notifier.clone(),
        }
    }
}
