//! # API crate: client core for the fitness goal tracker
//!
//! Everything the web client does that is not rendering lives here, so it can
//! be exercised natively with tokio and a mock HTTP server.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `AppConfig` (API base URL, token storage key) from defaults, `fitness.toml` and `FITNESS_*` env vars |
//! | [`client`] | `ApiClient`: JSON verbs over `reqwest`, explicit bearer injection, 401 hook, normalized `ApiError` |
//! | [`models`] | Wire types: `User`, `Goal`, `GoalDraft`, auth requests/response |
//! | [`session`] | `SessionStore`: login / register / logout / restore with injected [`store::Storage`] |
//! | [`goals`] | `GoalListController` and `GoalFormController` |
//! | [`auth_form`] | Login/register form state and field validation |
//! | [`events`] | `GoalEvents`: the "goals changed" publish/subscribe channel |
//! | [`tasks`] | `TaskScope`: cancellable in-flight requests |
//! | [`text`] | Display and validation helpers |
//!
//! ## Token flow
//!
//! The [`SessionStore`] is the only owner of the bearer token. Controllers
//! read it from the session and hand it to each [`ApiClient`] call; the
//! client never looks at storage.

pub mod auth_form;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod goals;
pub mod models;
pub mod session;
pub mod tasks;
pub mod text;

#[cfg(test)]
pub(crate) mod mock;

pub use auth_form::{AuthForm, AuthMode};
pub use client::ApiClient;
pub use self::config::{ApiConfig, AppConfig, StorageConfig};
pub use error::{ApiError, AuthError, FieldErrors};
pub use events::{GoalEvents, GoalSubscriber};
pub use goals::{GoalFormController, GoalFormState, GoalListController, GoalListState};
pub use models::{AuthResponse, Goal, GoalDraft, LoginRequest, RegisterRequest, User};
pub use session::{Logout, Redirect, Restore, Session, SessionStore};
pub use tasks::{Cancelled, TaskScope};
