//! Login / register form state.
//!
//! [`AuthForm`] is plain data: the UI keeps one in a signal, edits it through
//! the setters and hands a copy to [`AuthForm::submit`]. Field checks run
//! before the session store is involved; the store's own empty-field checks
//! stay as a second line.

use store::Storage;
use tracing::debug;

use crate::error::FieldErrors;
use crate::session::{Redirect, SessionStore};
use crate::text::validate_email;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_USERNAME: &str = "username";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    /// Label of the button that switches to the other mode.
    pub fn switch_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Switch to Register",
            AuthMode::Register => "Switch to Login",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub username: String,
    pub errors: FieldErrors,
    /// Message from the last failed submit.
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.errors = FieldErrors::new();
        self.error = None;
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.clear_field(FIELD_EMAIL);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.clear_field(FIELD_PASSWORD);
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.errors.clear_field(FIELD_USERNAME);
    }

    /// Check every field for the current mode. Returns `true` when valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        if self.email.is_empty() {
            errors.insert(FIELD_EMAIL, "Email is required");
        } else if !validate_email(&self.email) {
            errors.insert(FIELD_EMAIL, "Invalid email format");
        }
        if self.password.is_empty() {
            errors.insert(FIELD_PASSWORD, "Password is required");
        }
        if self.mode == AuthMode::Register && self.username.is_empty() {
            errors.insert(FIELD_USERNAME, "Username is required");
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Take the outcome of a submit that ran on a copy of this form.
    /// Field values typed in the meantime are kept.
    pub fn settle(&mut self, submitted: &AuthForm) {
        self.errors = submitted.errors.clone();
        self.error = submitted.error.clone();
        self.loading = submitted.loading;
    }

    /// Validate, then log in or register through `session`.
    ///
    /// Returns where to navigate on success. On failure the user-facing
    /// message is left in [`AuthForm::error`].
    pub async fn submit<S: Storage>(&mut self, session: &SessionStore<S>) -> Option<Redirect> {
        self.error = None;
        if !self.validate() {
            debug!(fields = self.errors.len(), "auth form rejected by validation");
            return None;
        }

        self.loading = true;
        let result = match self.mode {
            AuthMode::Login => session.login(&self.email, &self.password).await,
            AuthMode::Register => {
                session
                    .register(&self.email, &self.username, &self.password)
                    .await
            }
        };
        self.loading = false;

        match result {
            Ok(redirect) => Some(redirect),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
