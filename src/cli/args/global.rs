//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.skillbridge/config.yaml)
    pub config: Option<String>,

    /// API root override
    pub api_url: Option<String>,

    /// Storage file override
    pub storage: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            storage: cli.storage.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Load the config file with the flag overrides applied.
    pub fn load_config(&self) -> crate::error::Result<Config> {
        let config = Config::load_at(self.config_ref())?
            .with_overrides(self.api_url.as_deref(), self.storage.as_deref());
        config.validate()?;
        Ok(config)
    }

    /// The flag value, else the config preference, else pretty.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }
        match config.preferences.format.as_deref() {
            Some(name) => OutputFormat::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown format '{}' in config, using pretty", name);
                OutputFormat::Pretty
            }),
            None => OutputFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;

    #[test]
    fn test_format_precedence() {
        let config = Config {
            preferences: Preferences {
                format: Some("json".to_string()),
            },
            ..Default::default()
        };

        let flag = GlobalOptions {
            format: Some(OutputFormat::Table),
            ..Default::default()
        };
        assert_eq!(flag.resolve_format(&config), OutputFormat::Table);

        let none = GlobalOptions::default();
        assert_eq!(none.resolve_format(&config), OutputFormat::Json);
        assert_eq!(none.resolve_format(&Config::default()), OutputFormat::Pretty);
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "api_url: http://file/api\n").unwrap();

        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            api_url: Some("http://flag/api".to_string()),
            ..Default::default()
        };
        assert_eq!(opts.load_config().unwrap().api_url(), "http://flag/api");

        let bad = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            api_url: Some("ftp://nope".to_string()),
            ..Default::default()
        };
        assert!(bad.load_config().is_err());
    }
}
