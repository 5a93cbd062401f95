//! Configuration management for bulk-order.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/bulk-order/config.toml` (or platform equivalent)
/// unless an explicit path is given. If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External service settings
    pub service: ServiceConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Outbound identity settings
    pub identity: IdentityConfig,
    /// Selectors of the order form
    pub form: FormSelectors,
}

impl AppConfig {
    /// Load configuration from the XDG config path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here since the
    /// caller asked for that file specifically.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        Self::read(path)
    }

    /// Load configuration (explicit path or XDG default) with environment
    /// variable overrides applied, then validate it.
    ///
    /// Supports the following environment variables:
    /// - `BULKORDER_HEADLESS`: Override browser headless mode (true/false)
    /// - `BULKORDER_ENTRY_URL`: Override the service entry point
    /// - `BULKORDER_CONFIRMATION_TIMEOUT_SECS`: Override the confirmation wait window
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> ConfigResult<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BULKORDER_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("BULKORDER_ENTRY_URL") {
            tracing::debug!("Override service.entry_url from env: {}", val);
            self.service.entry_url = val;
        }

        if let Some(val) = lookup("BULKORDER_CONFIRMATION_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.service.confirmation_timeout_secs = secs;
                tracing::debug!("Override service.confirmation_timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would otherwise only fail once a session is running.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = url::Url::parse(&self.service.entry_url).map_err(|e| {
            ConfigError::InvalidValue {
                field: "service.entry_url".to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "service.entry_url".to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.service.confirmation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.confirmation_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.identity.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "identity.categories".to_string(),
                reason: "at least one category is required".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/bulk-order/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("org", "bulk-order", "bulk-order").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// External service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Entry point of the order form
    pub entry_url: String,
    /// Wait window for the confirmation message, in seconds
    pub confirmation_timeout_secs: u64,
    /// Pause between two records, in milliseconds (0 = none)
    pub pause_between_records_ms: u64,
}

impl ServiceConfig {
    /// Wait window for the confirmation message.
    #[must_use]
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    /// Pause between two records.
    #[must_use]
    pub fn pause_between_records(&self) -> Duration {
        Duration::from_millis(self.pause_between_records_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            entry_url: "https://special.usps.com/testkits".to_string(),
            confirmation_timeout_secs: 5,
            pause_between_records_ms: 0,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Chromium executable, auto-detected when unset
    pub executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            executable: None,
        }
    }
}

/// Outbound identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// User-agent categories the random identity is drawn from
    pub categories: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            categories: vec!["Browsers - Mac".to_string(), "Browsers - Windows".to_string()],
        }
    }
}

/// CSS selectors and action labels of the order form.
///
/// Click targets written `text=...` match on visible element text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSelectors {
    /// Contact first name input
    pub sender_first_name: String,
    /// Contact last name input
    pub sender_last_name: String,
    /// Contact email input
    pub sender_email: String,
    /// Shipping first name input
    pub first_name: String,
    /// Shipping last name input
    pub last_name: String,
    /// Street address input
    pub street_address: String,
    /// City input
    pub city: String,
    /// State `<select>`
    pub state: String,
    /// ZIP code input
    pub zip_code: String,
    /// Checkout action
    pub checkout: String,
    /// Final order placement action
    pub place_order: String,
    /// Containers the confirmation text can appear in, as one selector list
    pub confirmation: String,
}

impl Default for FormSelectors {
    fn default() -> Self {
        Self {
            sender_first_name: "#senderFirstName".to_string(),
            sender_last_name: "#senderLastName".to_string(),
            sender_email: "#senderEmail".to_string(),
            first_name: "#firstName".to_string(),
            last_name: "#lastName".to_string(),
            street_address: "#address1".to_string(),
            city: "#city".to_string(),
            state: "#state".to_string(),
            zip_code: "#zipCode".to_string(),
            checkout: "text=Check Out Now".to_string(),
            place_order: "text=Place My Order".to_string(),
            confirmation: ".red-banner, .message-wrapper, .confirmation-message > p > strong"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.entry_url, "https://special.usps.com/testkits");
        assert_eq!(config.service.confirmation_timeout(), Duration::from_secs(5));
        assert!(config.browser.headless);
        assert_eq!(config.identity.categories.len(), 2);
        assert_eq!(config.form.checkout, "text=Check Out Now");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[service]"));
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[identity]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.service.entry_url, config.service.entry_url);
    }

    #[test]
    fn test_load_from_path() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.service.confirmation_timeout_secs = 12;
        config.browser.headless = false;
        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.service.confirmation_timeout_secs, 12);
        assert!(!loaded.browser.headless);
    }

    #[test]
    fn test_load_from_missing_path() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BULKORDER_HEADLESS", "false"),
            ("BULKORDER_ENTRY_URL", "http://localhost:8080/form"),
            ("BULKORDER_CONFIRMATION_TIMEOUT_SECS", "not-a-number"),
        ]);

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert!(!config.browser.headless);
        assert_eq!(config.service.entry_url, "http://localhost:8080/form");
        // Unparseable values leave the default in place
        assert_eq!(config.service.confirmation_timeout_secs, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.service.entry_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.service.confirmation_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.identity.categories.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r##"
[service]
pause_between_records_ms = 250

[identity]
categories = ["Browsers - Mac"]

[form]
zip_code = "#zip"
"##;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.service.pause_between_records(), Duration::from_millis(250));
        assert_eq!(config.identity.categories, vec!["Browsers - Mac".to_string()]);
        assert_eq!(config.form.zip_code, "#zip");
        assert_eq!(config.form.city, "#city");
        // These should be defaults
        assert_eq!(config.service.confirmation_timeout_secs, 5);
        assert!(config.browser.headless);
    }
}
