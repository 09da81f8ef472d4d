//! # Client Configuration
//!
//! Where the inventory backend lives and how values are displayed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority, applied by the CLI)                │
//! │     --api-url http://inventory.local:8080                              │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     MARKETONIC_API_URL=http://inventory.local:8080                     │
//! │     MARKETONIC_API_TIMEOUT_SECS=30                                     │
//! │     MARKETONIC_CURRENCY=R$                                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/marketonic/dashboard.toml (Linux)                        │
//! │     ~/Library/Application Support/com.marketonic.marketonic/... (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, no timeout, "R$"                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # dashboard.toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30  # optional; omit to wait as long as the transport does
//!
//! [display]
//! currency_symbol = "R$"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "MARKETONIC_API_URL";
/// Environment variable overriding `api.timeout_secs`.
pub const ENV_API_TIMEOUT: &str = "MARKETONIC_API_TIMEOUT_SECS";
/// Environment variable overriding `display.currency_symbol`.
pub const ENV_CURRENCY: &str = "MARKETONIC_CURRENCY";

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `/produtos` and `/categorias` are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` leaves the transport default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Presentation settings for the rendered dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config pointed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Reads the TOML file without applying overrides or validating.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. This file
    /// 3. [`ClientConfig::apply_env_overrides`]
    /// 4. Command line flags, then [`ClientConfig::validate`]
    ///
    /// A missing file is not an error.
    pub fn read_file(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)?;
                Ok(toml::from_str(&contents)?)
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Saves configuration to file, creating parent directories.
    ///
    /// Returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = self.to_toml()?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Dashboard config saved");
        Ok(path)
    }

    /// The configuration as `dashboard.toml` text.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Applies `MARKETONIC_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_API_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric API timeout in environment"),
            }
        }

        if let Some(symbol) = lookup(ENV_CURRENCY) {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "marketonic", "marketonic")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.display.currency_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.currency_symbol(), "R$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::with_base_url("ftp://inventory");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "https://inventory.example.com/api/".into();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://inventory.example.com/api");

        config.api.timeout_secs = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "api.timeout_secs", .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://10.0.0.5:9000"),
            (ENV_API_TIMEOUT, "15"),
            (ENV_CURRENCY, "US$"),
        ]);

        let mut config = ClientConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.currency_symbol(), "US$");
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = Some(5);
        config.apply_overrides(|key| (key == ENV_API_TIMEOUT).then(|| "soon".to_string()));
        assert_eq!(config.api.timeout_secs, Some(5));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ClientConfig = toml::from_str("[api]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.toml");

        let mut config = ClientConfig::with_base_url("http://inventory.local:8080");
        config.display.currency_symbol = "€".into();
        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[display]"));
        assert!(!contents.contains("timeout_secs"));

        let loaded = ClientConfig::read_file(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ClientConfig::read_file(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded, ClientConfig::default());
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            ClientConfig::read_file(Some(path)),
            Err(ConfigError::LoadFailed(_))
        ));
    }
}
