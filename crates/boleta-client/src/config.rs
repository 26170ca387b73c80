//! # Client Configuration
//!
//! Where the backend lives, how to reach the DNI service, and where the
//! session file is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     BOLETA_API_URL=https://boletas.example.pe                           │
//! │     BOLETA_DNI_API_TOKEN=...                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/boleta/boleta.toml (Linux)                                │
//! │     ~/Library/Application Support/pe.boleta.client/boleta.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:8080, apiperu.dev, 30 s timeout                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//!
//! [identity]
//! url = "https://apiperu.dev/api/dni"
//! token = ""
//!
//! [session]
//! path = "/custom/session.json"   # optional
//!
//! [display]
//! currency_code = "PEN"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "BOLETA_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "BOLETA_API_TIMEOUT_SECS";
pub const ENV_DNI_API_URL: &str = "BOLETA_DNI_API_URL";
pub const ENV_DNI_API_TOKEN: &str = "BOLETA_DNI_API_TOKEN";
pub const ENV_SESSION_PATH: &str = "BOLETA_SESSION_PATH";

// =============================================================================
// Sections
// =============================================================================

/// Receipt / auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root of the backend; endpoint paths such as `/api/boletas` are
    /// appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// External DNI lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// Full endpoint URL; the DNI goes in the POST body.
    #[serde(default = "default_identity_url")]
    pub url: String,

    /// Bearer token issued by the lookup provider. Unrelated to the
    /// backend session.
    #[serde(default)]
    pub token: String,
}

fn default_identity_url() -> String {
    "https://apiperu.dev/api/dni".to_string()
}

impl Default for IdentitySettings {
    fn default() -> Self {
        IdentitySettings {
            url: default_identity_url(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session file location. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// ISO 4217 code used when printing amounts.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_currency_code() -> String {
    "PEN".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_code: default_currency_code(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub identity: IdentitySettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (boleta.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides or validation.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        require_http_url("api.base_url", &self.api.base_url)?;
        require_http_url("identity.url", &self.identity.url)?;

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.currency_code.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "currency_code must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BOLETA_*` overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_API_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric API timeout in environment"),
            }
        }

        if let Some(url) = lookup(ENV_DNI_API_URL) {
            debug!(url = %url, "Overriding DNI API URL from environment");
            self.identity.url = url;
        }

        if let Some(token) = lookup(ENV_DNI_API_TOKEN) {
            self.identity.token = token;
        }

        if let Some(path) = lookup(ENV_SESSION_PATH) {
            self.session.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("boleta.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Session file in use: the configured one, else `<data dir>/session.json`.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session
            .path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("session.json")))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("pe", "boleta", "boleta")
}

fn require_http_url(field: &str, value: &str) -> ClientResult<()> {
    let url = Url::parse(value).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", field, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::InvalidUrl(format!(
            "{} must start with http:// or https://, got: {}",
            field, value
        )));
    }
    Ok(())
}
