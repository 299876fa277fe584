//! # Client configuration
//!
//! Two settings, both with production defaults:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3001"
//!
//! [storage]
//! token_key = "fitness_app_auth_token"
//! ```
//!
//! [`AppConfig::load`] layers the sources (last wins):
//!
//! 1. built-in defaults, or `FITNESS_API_BASE_URL` / `FITNESS_AUTH_TOKEN_KEY`
//!    captured at compile time (the only option for wasm builds, which have
//!    no process environment);
//! 2. an optional `fitness.toml` in the working directory;
//! 3. `FITNESS_API__BASE_URL` / `FITNESS_STORAGE__TOKEN_KEY` env vars.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TOKEN_KEY: &str = "fitness_app_auth_token";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Where the session token is persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_base_url() -> String {
    option_env!("FITNESS_API_BASE_URL")
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

fn default_token_key() -> String {
    option_env!("FITNESS_AUTH_TOKEN_KEY")
        .unwrap_or(DEFAULT_TOKEN_KEY)
        .to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Join `path` onto the base URL, tolerating a trailing `/` on the base.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

impl AppConfig {
    /// The optional config file read by [`AppConfig::load`].
    pub fn filename() -> &'static str {
        "fitness.toml"
    }

    /// Load from defaults, `fitness.toml` and `FITNESS_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("storage.token_key", default_token_key())?
            .add_source(
                File::with_name(Self::filename())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("FITNESS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to point at another API server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to persist the token under another key.
    pub fn with_token_key(mut self, token_key: impl Into<String>) -> Self {
        self.storage.token_key = token_key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.storage.token_key, "fitness_app_auth_token");
    }

    #[test]
    fn test_toml_roundtrip_and_partial_file() {
        let config = AppConfig::default()
            .with_base_url("https://api.example.com")
            .with_token_key("my_token");
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);

        // Missing sections fall back to defaults
        let partial = AppConfig::from_toml("[api]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(partial.api.base_url, "http://x");
        assert_eq!(partial.storage.token_key, "fitness_app_auth_token");
    }

    #[test]
    fn test_load_env_override() {
        std::env::set_var("FITNESS_API__BASE_URL", "http://env-host:9000");
        let config = AppConfig::load().unwrap();
        std::env::remove_var("FITNESS_API__BASE_URL");

        assert_eq!(config.api.base_url, "http://env-host:9000");
        assert_eq!(config.storage.token_key, "fitness_app_auth_token");
    }

    #[test]
    fn test_url_join() {
        let api = ApiConfig::new("http://localhost:3001/");
        assert_eq!(api.url("/api/goals"), "http://localhost:3001/api/goals");
        assert_eq!(api.url("api/goals"), "http://localhost:3001/api/goals");
    }
}
