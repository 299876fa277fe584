//! # HTTP client adapter
//!
//! [`ApiClient`] is the single place the app talks to the remote API. It
//! wraps a `reqwest::Client` (browser `fetch` on wasm, hyper on native) and
//! adds three behaviours to every call:
//!
//! - **Bearer injection.** Each verb takes `bearer: Option<&str>`. When it is
//!   set the request carries `Authorization: Bearer <token>`. The caller reads
//!   the token from the session store. The client never touches storage.
//! - **401 side effect.** A `401 Unauthorized` response first invokes the hook
//!   installed with [`ApiClient::with_unauthorized_hook`]. The web shell uses it
//!   to send the browser back to `/`. The error is still returned to the
//!   caller. The credential exchanges ([`ApiClient::login`] and
//!   [`ApiClient::register`]) never run the hook: a 401 there means wrong
//!   credentials, which the form has to show.
//! - **Error normalization.** Every failure becomes an [`ApiError`], which is
//!   logged with method and URL before it is returned.
//!
//! Response bodies are decoded as JSON. An empty body decodes as `null`, so
//! endpoints that answer `200` with nothing can be read into `()` or
//! `serde_json::Value`.

use std::fmt;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{AuthResponse, ErrorBody, Goal, GoalDraft, LoginRequest, RegisterRequest};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const GOALS_PATH: &str = "/api/goals";

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// What a `401` response does besides failing the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unauthorized {
    Hook,
    Ignore,
}

/// JSON client for the fitness API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            on_unauthorized: None,
        }
    }

    /// Install the side effect run on every `401` response.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, None::<&()>, bearer, Unauthorized::Hook).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, Some(body), bearer, Unauthorized::Hook).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(Method::PUT, path, Some(body), bearer, Unauthorized::Hook).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, None::<&()>, bearer, Unauthorized::Hook).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<&str>,
        on_401: Unauthorized,
    ) -> Result<T, ApiError> {
        let url = self.config.url(path);
        debug!(%method, %url, authenticated = bearer.is_some(), "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = self.exchange(request, on_401).await;
        if let Err(err) = &result {
            error!(%method, %url, error = %err, "request failed");
        }
        result
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        on_401: Unauthorized,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;

        if status == StatusCode::UNAUTHORIZED && on_401 == Unauthorized::Hook {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode(&bytes)
    }

    // ============= Typed endpoints =============

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.send(Method::POST, LOGIN_PATH, Some(request), None, Unauthorized::Ignore)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.send(Method::POST, REGISTER_PATH, Some(request), None, Unauthorized::Ignore)
            .await
    }

    /// Fetch every goal. Any body other than a JSON array is
    /// [`ApiError::UnexpectedShape`].
    pub async fn list_goals(&self, bearer: Option<&str>) -> Result<Vec<Goal>, ApiError> {
        let body: Value = self.get(GOALS_PATH, bearer).await?;
        let items = match body {
            Value::Array(items) => items,
            other => {
                let err = ApiError::UnexpectedShape(format!("expected array, got {}", kind(&other)));
                error!(error = ?err, "goal list has wrong shape");
                return Err(err);
            }
        };
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
            .collect()
    }

    pub async fn create_goal(&self, bearer: Option<&str>, draft: &GoalDraft) -> Result<(), ApiError> {
        let _: Value = self.post(GOALS_PATH, draft, bearer).await?;
        Ok(())
    }

    pub async fn delete_goal(&self, bearer: Option<&str>, id: i64) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("{GOALS_PATH}/{id}"), bearer).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
