//! # Session store
//!
//! [`SessionStore`] owns the current [`Session`] (token and user) and is the
//! only component that reads or writes the persisted token. It is built
//! explicitly and handed to whoever needs it:
//!
//! ```ignore
//! let store = SessionStore::new(client, MemoryStorage::new(), "fitness_app_auth_token");
//! store.init();            // restore a persisted token, once at startup
//! store.login(email, pw).await?;
//! let token = store.token(); // attached by the goal controllers
//! store.dispose();         // cancel anything still in flight
//! ```
//!
//! Clones share one session, one storage backend and one [`TaskScope`].
//!
//! ## Persistence format
//!
//! The token is stored JSON-encoded (`"\"abc\""`) under the configured key.
//! [`SessionStore::init`] treats anything that does not decode as a JSON
//! string as corrupted and removes it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use store::{Storage, StoreError};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{AuthAction, AuthError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::tasks::TaskScope;

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Where the shell should navigate after a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The protected area.
    Dashboard,
    /// The public landing page.
    Home,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Dashboard => "/dashboard",
            Redirect::Home => "/",
        }
    }
}

/// What [`SessionStore::init`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restore {
    /// Nothing persisted (or storage unreadable).
    Empty,
    /// A token was restored. The user identity is still unknown.
    Restored,
    /// The persisted value was not a JSON string and has been removed.
    Corrupted,
}

/// Result of [`SessionStore::logout`]. The in-memory session is always
/// cleared, even when removing the persisted token failed.
#[derive(Debug)]
pub struct Logout {
    pub redirect: Redirect,
    pub storage_error: Option<StoreError>,
}

struct Shared<S> {
    storage: S,
    token_key: String,
    session: Mutex<Session>,
}

/// Authentication state holder with injected storage.
pub struct SessionStore<S> {
    client: ApiClient,
    shared: Arc<Shared<S>>,
    scope: TaskScope,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            shared: self.shared.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<S> PartialEq for SessionStore<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<S: Storage> SessionStore<S> {
    pub fn new(client: ApiClient, storage: S, token_key: impl Into<String>) -> Self {
        Self {
            client,
            shared: Arc::new(Shared {
                storage,
                token_key: token_key.into(),
                session: Mutex::new(Session::default()),
            }),
            scope: TaskScope::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn storage(&self) -> &S {
        &self.shared.storage
    }

    pub fn token_key(&self) -> &str {
        &self.shared.token_key
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    fn state(&self) -> MutexGuard<'_, Session> {
        self.shared
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Restore a persisted token. Run once at startup.
    pub fn init(&self) -> Restore {
        let key = self.token_key();
        let raw = match self.storage().get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted session");
                return Restore::Empty;
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted session");
                return Restore::Empty;
            }
        };

        match serde_json::from_str::<String>(&raw) {
            Ok(token) => {
                let mut session = self.state();
                session.token = Some(token);
                session.user = None;
                info!("session restored from storage");
                Restore::Restored
            }
            Err(e) => {
                warn!(error = %e, "persisted session is corrupted, clearing it");
                if let Err(e) = self.storage().remove_item(key) {
                    warn!(error = %e, "could not remove corrupted session");
                }
                *self.state() = Session::default();
                Restore::Corrupted
            }
        }
    }

    /// Cancel any login/register still in flight. Their results are dropped.
    pub fn dispose(&self) {
        self.scope.cancel();
    }

    /// Exchange credentials for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Redirect, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let client = self.client.clone();
        let response = self
            .scope
            .run(async move { client.login(&request).await })
            .await
            .map_err(|_| AuthError::Cancelled)?
            .map_err(|e| AuthError::from_api(AuthAction::Login, e))?;
        Ok(self.establish(response))
    }

    /// Create an account and sign in with it.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Redirect, AuthError> {
        if email.is_empty() || username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let request = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        let client = self.client.clone();
        let response = self
            .scope
            .run(async move { client.register(&request).await })
            .await
            .map_err(|_| AuthError::Cancelled)?
            .map_err(|e| AuthError::from_api(AuthAction::Register, e))?;
        Ok(self.establish(response))
    }

    fn establish(&self, response: AuthResponse) -> Redirect {
        let AuthResponse { token, user } = response;
        info!(user = %user.username, "signed in");

        // Persist first; the in-memory session is authoritative either way.
        match serde_json::to_string(&token) {
            Ok(encoded) => {
                if let Err(e) = self.storage().set_item(self.token_key(), &encoded) {
                    warn!(error = %e, "could not persist session token");
                }
            }
            Err(e) => warn!(error = %e, "could not encode session token"),
        }

        let mut session = self.state();
        session.token = Some(token);
        session.user = Some(user);
        Redirect::Dashboard
    }

    /// Clear the session in memory and in storage.
    pub fn logout(&self) -> Logout {
        *self.state() = Session::default();

        let storage_error = self.storage().remove_item(self.token_key()).err();
        if let Some(e) = &storage_error {
            warn!(error = %e, "could not remove persisted session");
        }
        info!("signed out");

        Logout {
            redirect: Redirect::Home,
            storage_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use store::MemoryStorage;

    use super::*;
    use crate::config::ApiConfig;
    use crate::mock::{closed_base_url, MockServer};

    const KEY: &str = "fitness_app_auth_token";

    fn auth_router() -> Router {
        Router::new()
            .route(
                "/api/auth/login",
                post(|Json(body): Json<Value>| async move {
                    match (body["email"].as_str(), body["password"].as_str()) {
                        (Some("a@b.co"), Some("secret")) => (
                            StatusCode::OK,
                            Json(json!({
                                "token": "tok-123",
                                "user": { "id": "7", "email": "a@b.co", "username": "ann" }
                            })),
                        ),
                        (Some(""), _) => (StatusCode::BAD_REQUEST, Json(json!({}))),
                        (Some("crash@b.co"), _) => {
                            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
                        }
                        (Some("teapot@b.co"), _) => (
                            StatusCode::IM_A_TEAPOT,
                            Json(json!({ "message": "short and stout" })),
                        ),
                        _ => (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "bad credentials" })),
                        ),
                    }
                }),
            )
            .route(
                "/api/auth/register",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "token": "tok-new",
                        "user": {
                            "id": "8",
                            "email": body["email"],
                            "username": body["username"],
                        }
                    }))
                }),
            )
    }

    fn store_for(server: &MockServer, storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        SessionStore::new(server.client(), storage, KEY)
    }

    #[tokio::test]
    async fn test_login_with_empty_field_makes_no_call() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());

        for (email, password) in [("", "secret"), ("a@b.co", ""), ("", "")] {
            let err = store.login(email, password).await.unwrap_err();
            assert_eq!(err, AuthError::MissingCredentials);
        }

        assert_eq!(server.hits.count(), 0);
        assert_eq!(store.session(), Session::default());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_login_success_sets_and_persists_token() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());

        let redirect = store.login("a@b.co", "secret").await.unwrap();

        assert_eq!(redirect, Redirect::Dashboard);
        assert_eq!(redirect.path(), "/dashboard");
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.session().user.unwrap().username, "ann");
        assert_eq!(
            storage.get_item(KEY).unwrap().as_deref(),
            Some("\"tok-123\"")
        );
    }

    #[tokio::test]
    async fn test_login_failures_map_to_messages_and_keep_session() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());

        let err = store.login("a@b.co", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Incorrect email or password.");

        let err = store.login("crash@b.co", "x").await.unwrap_err();
        assert_eq!(err, AuthError::Server);

        let err = store.login("teapot@b.co", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed: 418 - short and stout");

        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_user_on_form_with_redirect_hook() {
        let server = MockServer::start(auth_router()).await;
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = redirects.clone();
        let client = server.client().with_unauthorized_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let store = SessionStore::new(client, MemoryStorage::new(), KEY);

        let err = store.login("a@b.co", "wrong").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Incorrect email or password.");
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let client = ApiClient::new(ApiConfig::new(closed_base_url().await));
        let store = SessionStore::new(client, MemoryStorage::new(), KEY);

        let err = store.login("a@b.co", "secret").await.unwrap_err();

        assert_eq!(err, AuthError::Network);
        assert_eq!(err.to_string(), "Network error. Please check your connection.");
        assert_eq!(store.session(), Session::default());
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let server = MockServer::start(auth_router()).await;
        let store = store_for(&server, MemoryStorage::new());

        let err = store.register("a@b.co", "", "pw").await.unwrap_err();

        assert_eq!(err, AuthError::MissingFields);
        assert_eq!(server.hits.count(), 0);
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());

        let redirect = store.register("new@b.co", "newbie", "pw").await.unwrap();

        assert_eq!(redirect, Redirect::Dashboard);
        assert_eq!(store.token().as_deref(), Some("tok-new"));
        assert_eq!(
            store.session().user,
            Some(User {
                id: "8".into(),
                email: "new@b.co".into(),
                username: "newbie".into(),
            })
        );
        assert_eq!(storage.get_item(KEY).unwrap().as_deref(), Some("\"tok-new\""));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());
        store.login("a@b.co", "secret").await.unwrap();

        let logout = store.logout();

        assert_eq!(logout.redirect, Redirect::Home);
        assert!(logout.storage_error.is_none());
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(storage.get_item(KEY).unwrap().is_none());

        // From an empty state too
        let again = store.logout();
        assert_eq!(again.redirect, Redirect::Home);
        assert!(!store.is_authenticated());
    }

    struct BrokenRemoval(MemoryStorage);

    impl Storage for BrokenRemoval {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.set_item(key, value)
        }

        fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    #[tokio::test]
    async fn test_logout_storage_failure_still_clears_memory() {
        let server = MockServer::start(auth_router()).await;
        let store = SessionStore::new(
            server.client(),
            BrokenRemoval(MemoryStorage::new()),
            KEY,
        );
        store.login("a@b.co", "secret").await.unwrap();

        let logout = store.logout();

        assert!(logout.storage_error.is_some());
        assert_eq!(logout.redirect, Redirect::Home);
        assert_eq!(store.session(), Session::default());
    }

    #[tokio::test]
    async fn test_init_restores_persisted_token() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::with_items([(KEY, "\"tok-old\"")]);
        let store = store_for(&server, storage);

        assert_eq!(store.init(), Restore::Restored);
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-old"));
        assert!(store.session().user.is_none());
    }

    #[tokio::test]
    async fn test_init_without_token_is_empty() {
        let server = MockServer::start(auth_router()).await;
        let store = store_for(&server, MemoryStorage::new());

        assert_eq!(store.init(), Restore::Empty);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_init_clears_corrupted_value_idempotently() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::with_items([(KEY, "tok-not-json")]);
        let store = store_for(&server, storage.clone());

        assert_eq!(store.init(), Restore::Corrupted);
        assert_eq!(store.session(), Session::default());
        assert!(storage.get_item(KEY).unwrap().is_none());

        assert_eq!(store.init(), Restore::Empty);
        assert_eq!(store.session(), Session::default());
    }

    #[tokio::test]
    async fn test_custom_token_key() {
        let server = MockServer::start(auth_router()).await;
        let storage = MemoryStorage::new();
        let store = SessionStore::new(server.client(), storage.clone(), "other_key");

        store.login("a@b.co", "secret").await.unwrap();

        assert!(storage.get_item(KEY).unwrap().is_none());
        assert_eq!(
            storage.get_item("other_key").unwrap().as_deref(),
            Some("\"tok-123\"")
        );
    }

    #[tokio::test]
    async fn test_dispose_cancels_login_in_flight() {
        let server = MockServer::start(Router::new().route(
            "/api/auth/login",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        ))
        .await;
        let storage = MemoryStorage::new();
        let store = store_for(&server, storage.clone());
        let disposer = store.clone();

        let (result, ()) = tokio::join!(store.login("a@b.co", "secret"), async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            disposer.dispose();
        });

        assert_eq!(result, Err(AuthError::Cancelled));
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }
}
