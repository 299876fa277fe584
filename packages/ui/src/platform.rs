//! Platform wiring for the session store.
//!
//! Picks the [`store::Storage`] backend and the 401 side effect:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorage`],
//!   a 401 sends the browser back to `/`
//! - **Desktop** (native): filesystem via [`store::FileStorage`] under
//!   `<data_dir>/fitness-tracker/`, a 401 is only logged
//! - **WASM without `web`**: in-memory, nothing survives a reload

use api::{ApiClient, ApiConfig, AppConfig, SessionStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = store::FileStorage;

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub fn make_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("fitness-tracker");
        store::FileStorage::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStorage::new()
    }
}

/// Configuration from defaults, `fitness.toml` and `FITNESS_*` variables.
/// A broken source is logged and the defaults are used instead.
pub fn load_config() -> AppConfig {
    AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    })
}

/// API client with the platform's 401 side effect installed.
pub fn make_client(config: &ApiConfig) -> ApiClient {
    ApiClient::new(config.clone()).with_unauthorized_hook(on_unauthorized)
}

fn on_unauthorized() {
    tracing::warn!("Request rejected as unauthorized, returning to home");
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href("/") {
                tracing::warn!("Failed to redirect to home: {:?}", e);
            }
        }
    }
}

pub fn make_session_store(config: &AppConfig) -> SessionStore<PlatformStorage> {
    SessionStore::new(
        make_client(&config.api),
        make_storage(),
        config.storage.token_key.clone(),
    )
}
