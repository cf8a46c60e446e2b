//! Configuration management for the SkillBridge client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default API root of a local SkillBridge backend
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API root every endpoint is joined onto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Location of the key-value storage file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Request timeout in seconds; the transport default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// System colour-scheme preference used before a theme is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefers_dark: Option<bool>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Directory holding the config and storage files (~/.skillbridge)
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".skillbridge"))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.yaml"))
    }

    /// Resolve an optional override into a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// The API root, trailing slash removed
    pub fn api_url(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// The storage file location
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::base_dir()?.join("storage.json")),
        }
    }

    /// Request timeout, when one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Apply command-line and environment overrides on top of the file values.
    pub fn with_overrides(mut self, api_url: Option<&str>, storage: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = Some(url.to_string());
        }
        if let Some(path) = storage {
            self.storage_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Validate values that would otherwise fail later at request time
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got '{}'",
                url
            ))
            .into());
        }
        if self.request_timeout_secs == Some(0) {
            return Err(
                ConfigError::Invalid("request_timeout_secs must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.request_timeout().is_none());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let config = Config {
            api_url: Some("https://skillbridge.example/api/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_url(), "https://skillbridge.example/api");
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let config = Config {
            api_url: Some("http://file".to_string()),
            ..Default::default()
        }
        .with_overrides(Some("http://flag"), Some("/tmp/store.json"));

        assert_eq!(config.api_url(), "http://flag");
        assert_eq!(
            config.storage_path().unwrap(),
            PathBuf::from("/tmp/store.json")
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_url: Some("http://localhost:9000/api".to_string()),
            request_timeout_secs: Some(15),
            prefers_dark: Some(true),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url(), "http://localhost:9000/api");
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(loaded.prefers_dark, Some(true));
    }

    #[test]
    fn test_load_at_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = Config::load_at(Some(path.to_str().unwrap())).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            api_url: Some("localhost:8080".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
