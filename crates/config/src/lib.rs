//! Configuration loading, validation, and management for screenset.
//!
//! Loads configuration from `~/.screenset/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.screenset/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Business API key, sent with every remote request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Business API data-center domain (requests go to `accounts.<domain>`)
    #[serde(default = "default_api_domain")]
    pub api_domain: String,

    /// Directory local markup assets are read from
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,

    /// Language used when a command does not name one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Timeout for a single remote request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fixed country code reported as platform data instead of detecting it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

fn default_api_domain() -> String {
    "us1.gigya.com".into()
}
fn default_asset_root() -> PathBuf {
    PathBuf::from("assets")
}
fn default_language() -> String {
    "en".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_domain", &self.api_domain)
            .field("asset_root", &self.asset_root)
            .field("default_language", &self.default_language)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("country", &self.country)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.screenset/config.toml).
    ///
    /// Environment variables override the file:
    /// - `SCREENSET_API_KEY`
    /// - `SCREENSET_API_DOMAIN`
    /// - `SCREENSET_ASSET_ROOT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("SCREENSET_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(domain) = lookup("SCREENSET_API_DOMAIN") {
            self.api_domain = domain;
        }
        if let Some(root) = lookup("SCREENSET_ASSET_ROOT") {
            self.asset_root = PathBuf::from(root);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".screenset")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_domain.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api_domain must not be empty".into(),
            ));
        }

        if self.default_language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_language must not be empty".into(),
            ));
        }

        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be between 1 and 300".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Base URL of the accounts API for the configured domain.
    pub fn api_base_url(&self) -> String {
        format!("https://accounts.{}", self.api_domain.trim_end_matches('/'))
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_domain: default_api_domain(),
            asset_root: default_asset_root(),
            default_language: default_language(),
            request_timeout_secs: default_request_timeout_secs(),
            country: None,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api_domain, "us1.gigya.com");
        assert_eq!(config.default_language, "en");
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api_domain, config.api_domain);
        assert_eq!(parsed.asset_root, config.asset_root);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_domain_rejected() {
        let config = AppConfig {
            api_domain: "  ".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().api_domain, "us1.gigya.com");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_key = "3_abc"
api_domain = "eu1.gigya.com"
asset_root = "/opt/app/assets"
country = "fr"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("3_abc"));
        assert_eq!(config.api_base_url(), "https://accounts.eu1.gigya.com");
        assert_eq!(config.asset_root, PathBuf::from("/opt/app/assets"));
        assert_eq!(config.country.as_deref(), Some("fr"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_domain = [").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("SCREENSET_API_KEY", "3_env"),
            ("SCREENSET_ASSET_ROOT", "bundle"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("3_env"));
        assert_eq!(config.asset_root, PathBuf::from("bundle"));
        assert_eq!(config.api_domain, "us1.gigya.com");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("3_secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("3_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("us1.gigya.com"));
        assert!(toml_str.contains("request_timeout_secs"));
    }
}
