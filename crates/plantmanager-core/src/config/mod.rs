//! Client configuration.
//!
//! Provides the `AppConfig` struct used by front ends to find the catalog API,
//! size catalog pages, and pick the display locale. Values come from a JSON
//! file and can be overridden through `PLANTMANAGER_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::relative_time::Locale;
use crate::util::{is_http_url, normalize_text_option};

const CONFIG_SCHEMA_VERSION: u32 = 1;
const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_PAGE_SIZE: u32 = 8;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "PLANTMANAGER_API_URL";
pub const ENV_LOCALE: &str = "PLANTMANAGER_LOCALE";
pub const ENV_DB_PATH: &str = "PLANTMANAGER_DB_PATH";

/// Persisted client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_schema_version")]
    pub version: u32,
    /// Base URL of the plant catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Plants fetched per catalog page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// HTTP request timeout; `None` or 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub locale: Locale,
    /// Local database file; front ends pick a platform default when unset
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_SCHEMA_VERSION,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: default_request_timeout_secs(),
            locale: Locale::default(),
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Load the config file at `path`, falling back to defaults when it does
    /// not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parse and validate a config payload.
    pub fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid config JSON: {error}")))?;
        config.validate()
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Apply `PLANTMANAGER_*` overrides read through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = normalize_text_option(lookup(ENV_API_URL)) {
            self.api_base_url = url;
        }
        if let Some(locale) = normalize_text_option(lookup(ENV_LOCALE)) {
            self.locale = locale.parse()?;
        }
        if let Some(db_path) = normalize_text_option(lookup(ENV_DB_PATH)) {
            self.db_path = Some(PathBuf::from(db_path));
        }
        self.validate()
    }

    /// Normalize fields and reject values the clients cannot work with.
    pub fn validate(mut self) -> Result<Self> {
        if self.version != CONFIG_SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "unsupported config version {} (expected {})",
                self.version, CONFIG_SCHEMA_VERSION
            )));
        }

        let url = normalize_text_option(Some(self.api_base_url))
            .ok_or_else(|| Error::Config("api_base_url is required".to_string()))?;
        if !is_http_url(&url) {
            return Err(Error::Config(
                "api_base_url must include http:// or https://".to_string(),
            ));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();

        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }

        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }

        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

const fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[allow(clippy::unnecessary_wraps)]
const fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}
