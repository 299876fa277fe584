//! Error types for the client core.
//!
//! - [`ApiError`]: what an HTTP call can fail with, normalized from `reqwest`.
//! - [`AuthError`]: what login/register report to the user. Each variant's
//!   `Display` is the text shown on screen.
//! - [`FieldErrors`]: field-scoped validation messages for forms.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::tasks::Cancelled;

pub(crate) const NO_RESPONSE: &str =
    "No response received from the server. Please check your network connection.";

/// Normalized failure of an HTTP call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, CORS, timeout).
    #[error("{}", NO_RESPONSE)]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{status} - {}", .message.as_deref().unwrap_or("Unknown error"))]
    Status { status: u16, message: Option<String> },

    /// The body parsed but did not have the expected structure.
    #[error("Unexpected data format from API.")]
    UnexpectedShape(String),

    /// The body could not be decoded, or the request could not be built.
    #[error("{0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// The HTTP status, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `{ message }` text of the normalized error object.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() || err.is_builder() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<Cancelled> for ApiError {
    fn from(_: Cancelled) -> Self {
        ApiError::Cancelled
    }
}

/// Which session operation failed, for the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthAction::Login => f.write_str("Login"),
            AuthAction::Register => f.write_str("Registration"),
        }
    }
}

/// User-facing failure of a login or register attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Please enter both email and password.")]
    MissingCredentials,

    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Invalid request. Please check your input.")]
    BadRequest,

    #[error("Incorrect email or password.")]
    InvalidCredentials,

    #[error("Internal server error. Please try again later.")]
    Server,

    #[error("Network error. Please check your connection.")]
    Network,

    #[error("{action} failed: {message}")]
    Failed { action: AuthAction, message: String },

    #[error("request cancelled")]
    Cancelled,
}

impl AuthError {
    /// Map a failed credential exchange to the message the user sees.
    pub fn from_api(action: AuthAction, err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 400, .. } => AuthError::BadRequest,
            ApiError::Status { status: 401, .. } => AuthError::InvalidCredentials,
            ApiError::Status { status: 500, .. } => AuthError::Server,
            ApiError::Network(_) => AuthError::Network,
            ApiError::Cancelled => AuthError::Cancelled,
            other => AuthError::Failed {
                action,
                message: other.message(),
            },
        }
    }
}

/// Validation messages keyed by field name. Iteration is sorted by name,
/// not by the order the fields appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().map(String::as_str)
    }
}
