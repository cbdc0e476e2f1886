use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::ApiVersion;

/// Theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the todo-list service
    pub server_url: String,
    /// API dialect to use; v1 keeps backward compatibility with old servers
    pub api_version: ApiVersion,
    /// Theme mode selection
    pub theme_mode: ThemeMode,
    /// Show help overlay
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            api_version: ApiVersion::V1,
            theme_mode: ThemeMode::default(),
            show_help: false,
        }
    }
}

impl Config {
    /// Load configuration from file, creating the default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            serde_json::from_str(&content).unwrap_or_else(|_| {
                // If parsing fails, use default and save it
                let default_config = Config::default();
                let _ = default_config.save();
                default_config
            })
        } else {
            let default_config = Config::default();
            let _ = default_config.save();
            default_config
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        // XDG config directory standard with ~/.config fallback
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            home_dir.join(".config")
        };

        Ok(config_dir.join("todo-tui").join("config.json"))
    }

    /// Set API version
    pub fn set_api_version(&mut self, version: ApiVersion) {
        self.api_version = version;
    }

    /// Set theme mode
    pub fn set_theme_mode(&mut self, theme_mode: ThemeMode) {
        self.theme_mode = theme_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get theme display string
    pub fn theme_display(&self) -> &str {
        match self.theme_mode {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.api_version, ApiVersion::V1);
        assert_eq!(config.theme_mode, ThemeMode::Dark);
        assert!(!config.show_help);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            server_url: "http://tasks.example:9090".to_string(),
            api_version: ApiVersion::V2,
            theme_mode: ThemeMode::Light,
            show_help: true,
        };

        let serialized = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config.server_url, deserialized.server_url);
        assert_eq!(config.api_version, deserialized.api_version);
        assert_eq!(config.theme_mode, deserialized.theme_mode);
        assert_eq!(config.show_help, deserialized.show_help);
    }

    #[test]
    fn test_api_version_uses_wire_value_in_config() {
        let config = Config {
            api_version: ApiVersion::V2,
            ..Default::default()
        };
        let serialized = serde_json::to_string(&config).unwrap();
        assert!(serialized.contains("\"v2\""));
    }

    #[test]
    fn test_incomplete_config_is_rejected_by_serde() {
        let parsed: Result<Config, _> = serde_json::from_str("{\"bogus\": true}");
        // Missing required fields: the loader replaces this with the default.
        assert!(parsed.is_err());
    }

    #[test]
    fn test_help_toggle() {
        let mut config = Config::default();
        config.toggle_help();
        assert!(config.show_help);
        config.toggle_help();
        assert!(!config.show_help);
    }

    #[test]
    fn test_setters() {
        let mut config = Config::default();

        config.set_api_version(ApiVersion::V2);
        assert_eq!(config.api_version, ApiVersion::V2);

        config.set_theme_mode(ThemeMode::Light);
        assert_eq!(config.theme_display(), "Light");
    }
}
