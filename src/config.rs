//! Configuration management for chatctl
//!
//! Loads YAML configuration with serde defaults, applies CLI overrides,
//! and validates the result. A missing config file is not an error — the
//! defaults describe a fully working setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{ChatctlError, Result};

/// Main configuration structure for chatctl
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat store behavior settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Snapshot storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the snapshot directory; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Chat store behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Title given to a freshly created session
    #[serde(default = "default_title")]
    pub default_title: String,

    /// How many characters of the first user message become the title
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

fn default_title() -> String {
    "New Chat".to_string()
}

fn default_title_max_chars() -> usize {
    40
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            title_max_chars: default_title_max_chars(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, then apply CLI overrides
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// an error (a config the user wrote should never be half-applied).
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| ChatctlError::Config(format!("Failed to read {}: {}", path, e)))?;
            serde_yaml::from_str(&raw)
                .map_err(|e| ChatctlError::Config(format!("Failed to parse {}: {}", path, e)))?
        } else {
            tracing::debug!(path, "config file not found, using defaults");
            Config::default()
        };

        if let Some(dir) = &cli.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chat.default_title.trim().is_empty() {
            return Err(
                ChatctlError::Config("chat.default_title must not be empty".to_string()).into(),
            );
        }
        if self.chat.title_max_chars == 0 {
            return Err(
                ChatctlError::Config("chat.title_max_chars must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands, SessionCommand};
    use std::fs;
    use tempfile::TempDir;

    fn cli_with_data_dir(data_dir: Option<PathBuf>) -> Cli {
        Cli {
            config: None,
            data_dir,
            verbose: false,
            command: Commands::Session {
                command: SessionCommand::List,
            },
        }
    }

    fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("failed to create tempdir");
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, contents).expect("failed to write config file");
        (temp_dir, config_path)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chat.default_title, "New Chat");
        assert_eq!(config.chat.title_max_chars, 40);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cli = cli_with_data_dir(None);
        let config = Config::load("does/not/exist.yaml", &cli).expect("load failed");
        assert_eq!(config.chat.default_title, "New Chat");
    }

    #[test]
    fn test_load_parses_yaml() {
        let (_dir, path) = temp_config_file(
            "chat:\n  default_title: \"Untitled\"\n  title_max_chars: 20\nstorage:\n  data_dir: /tmp/chatctl-test\n",
        );
        let cli = cli_with_data_dir(None);
        let config = Config::load(path.to_str().unwrap(), &cli).expect("load failed");

        assert_eq!(config.chat.default_title, "Untitled");
        assert_eq!(config.chat.title_max_chars, 20);
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/tmp/chatctl-test"))
        );
    }

    #[test]
    fn test_load_partial_yaml_fills_defaults() {
        let (_dir, path) = temp_config_file("chat:\n  title_max_chars: 12\n");
        let cli = cli_with_data_dir(None);
        let config = Config::load(path.to_str().unwrap(), &cli).expect("load failed");

        assert_eq!(config.chat.title_max_chars, 12);
        assert_eq!(config.chat.default_title, "New Chat");
    }

    #[test]
    fn test_load_malformed_yaml_is_error() {
        let (_dir, path) = temp_config_file("chat: [not, a, map]\n");
        let cli = cli_with_data_dir(None);
        assert!(Config::load(path.to_str().unwrap(), &cli).is_err());
    }

    #[test]
    fn test_cli_data_dir_overrides_file() {
        let (_dir, path) = temp_config_file("storage:\n  data_dir: /from/file\n");
        let cli = cli_with_data_dir(Some(PathBuf::from("/from/cli")));
        let config = Config::load(path.to_str().unwrap(), &cli).expect("load failed");

        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut config = Config::default();
        config.chat.default_title = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_title_chars() {
        let mut config = Config::default();
        config.chat.title_max_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
