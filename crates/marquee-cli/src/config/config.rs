//! `AppConfig` struct, TOML loading and environment overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use marquee_api::catalog::{DEFAULT_IMAGE_BASE_URL, DEFAULT_REGION};
use marquee_api::tmdb::{Credentials, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Bearer token (v4 read access token).
const ENV_API_TOKEN: &str = "TMDB_API_TOKEN";
/// v3 API key.
const ENV_API_KEY: &str = "TMDB_API_KEY";
/// API base URL override.
const ENV_BASE_URL: &str = "TMDB_BASE_URL";
/// Image host override.
const ENV_IMAGE_BASE_URL: &str = "TMDB_IMAGE_BASE_URL";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbSettings,
    /// Browse view tuning.
    #[serde(default)]
    pub browse: BrowseSettings,
}

/// TMDB connection settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbSettings {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Image host and size prefix.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Market for the now-playing listing.
    #[serde(default = "default_region")]
    pub region: String,
    /// v3 API key. `TMDB_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Bearer token; only ever read from `TMDB_API_TOKEN`, never persisted.
    #[serde(skip)]
    pub api_token: Option<String>,
}

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

fn default_image_base_url() -> String {
    String::from(DEFAULT_IMAGE_BASE_URL)
}

fn default_region() -> String {
    String::from(DEFAULT_REGION)
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            region: default_region(),
            api_key: None,
            api_token: None,
        }
    }
}

impl TmdbSettings {
    /// Credentials to send; the bearer token wins over the API key.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = non_empty(self.api_token.as_deref()) {
            return Some(Credentials::BearerToken(String::from(token)));
        }
        non_empty(self.api_key.as_deref()).map(|key| Credentials::ApiKey(String::from(key)))
    }
}

/// Browse view tuning.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseSettings {
    /// Debounce window for query edits, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    500
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl BrowseSettings {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Applies `TMDB_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies `TMDB_*` overrides using `lookup` to read variables.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.tmdb.api_token = Some(token);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            tracing::debug!(base_url = %url, "TMDB base URL overridden from environment");
            self.tmdb.base_url = url;
        }
        if let Some(url) = lookup(ENV_IMAGE_BASE_URL) {
            self.tmdb.image_base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3/");
        assert_eq!(
            config.tmdb.image_base_url,
            "https://image.tmdb.org/t/p/w500"
        );
        assert_eq!(config.tmdb.region, "US");
        assert!(config.tmdb.credentials().is_none());
        assert_eq!(config.browse.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_token_is_never_persisted() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("secret-token"));

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();

        // Assert
        assert!(!toml_str.contains("secret-token"));
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\ndebounce_ms = 300\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.browse.debounce_ms, 300);
        assert_eq!(config.tmdb, TmdbSettings::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\nregion = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("from-file"));

        // Act
        let config = config.with_overrides(env(&[
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_BASE_URL", "http://127.0.0.1:9/3/"),
            ("TMDB_IMAGE_BASE_URL", "http://img.local/w185"),
        ]));

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.tmdb.base_url, "http://127.0.0.1:9/3/");
        assert_eq!(config.tmdb.image_base_url, "http://img.local/w185");
    }

    #[test]
    fn test_bearer_token_wins_over_api_key() {
        // Arrange
        let config = AppConfig::default()
            .with_overrides(env(&[("TMDB_API_TOKEN", "tok"), ("TMDB_API_KEY", "key")]));

        // Act
        let credentials = config.tmdb.credentials();

        // Assert
        assert_eq!(
            credentials,
            Some(Credentials::BearerToken(String::from("tok")))
        );
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        // Arrange & Act
        let config = AppConfig::default()
            .with_overrides(env(&[("TMDB_API_TOKEN", "  "), ("TMDB_BASE_URL", "")]));

        // Assert
        assert!(config.tmdb.credentials().is_none());
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3/");
    }
}
