use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::TidyError;

/// Environment variable overriding the data directory (~/.tidyrules)
pub const HOME_ENV: &str = "TIDYRULES_HOME";

/// Global TidyRules configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Rule file looked up in the scan root when none is given
    #[serde(default = "default_rules_file")]
    pub default_rules_file: PathBuf,

    /// Runs only report matches unless `--apply` is passed
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Ask before deleting anything
    #[serde(default = "default_true")]
    pub confirm: bool,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "quiet" => Ok(OutputFormat::Quiet),
            _ => Err(format!("expected human, json or quiet, got '{}'", s)),
        }
    }
}

fn default_rules_file() -> PathBuf {
    PathBuf::from(crate::rules::loader::ROOT_RULES_FILE)
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_rules_file: default_rules_file(),
            dry_run: true,
            confirm: true,
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the TidyRules data directory (~/.tidyrules, or $TIDYRULES_HOME)
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".tidyrules")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from the default location, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Set a single key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TidyError> {
        let invalid = |message: String| TidyError::ConfigError {
            path: Self::config_path(),
            message,
        };
        match key {
            "default_rules_file" => self.default_rules_file = PathBuf::from(value),
            "dry_run" => {
                self.dry_run = value
                    .parse()
                    .map_err(|_| invalid(format!("dry_run must be true or false, got '{}'", value)))?
            }
            "confirm" => {
                self.confirm = value
                    .parse()
                    .map_err(|_| invalid(format!("confirm must be true or false, got '{}'", value)))?
            }
            "output_format" => self.output_format = value.parse().map_err(invalid)?,
            _ => return Err(invalid(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}
