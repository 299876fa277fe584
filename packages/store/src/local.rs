//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the durable [`Storage`] used on the **web platform**.
//! It is a zero-size handle that looks up `window.localStorage` on every
//! call, so it stays `Clone` and never holds a JS object across awaits.
//!
//! `localStorage` can be missing (no window, e.g. in a worker) or can throw
//! (private browsing, quota exceeded). Both cases surface as
//! [`StoreError::Unavailable`] with the stringified JS error.

use wasm_bindgen::JsValue;

use crate::storage::{Storage, StoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend(&self) -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{err:?}"))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.backend()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.backend()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.backend()?.remove_item(key).map_err(js_error)
    }
}
