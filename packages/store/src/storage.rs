//! # Storage capability
//!
//! [`Storage`] is a small synchronous key/value interface. It mirrors the
//! browser's `localStorage` API (`getItem` / `setItem` / `removeItem`), so the
//! web backend maps onto it one-to-one. The native backends follow the same
//! contract:
//!
//! - `get_item` on a missing key returns `Ok(None)`, never an error;
//! - `remove_item` on a missing key is a no-op that succeeds;
//! - `set_item` overwrites any previous value.
//!
//! Values are opaque strings. Callers that need structure (the session store
//! keeps a JSON-encoded token) do their own encoding.

use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend exists but cannot be used right now (e.g. `localStorage`
    /// is disabled, or the quota is exhausted).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value persistence injected into the session store.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}
