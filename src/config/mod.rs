//! Configuration file support for sshot.
//!
//! An optional TOML file at `~/.config/sshot/config.toml` supplies defaults
//! for the output flags. Command-line flags always win. The `SSHOT_CONFIG`
//! environment variable points at a different file.
//!
//! If no config file exists, built-in defaults are used.

pub mod capture;
pub mod types;

pub use capture::CaptureConfig;
pub use types::{BatchConfig, OutputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::ImageFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SSHOT_CONFIG";

/// Root of the configuration file.
///
/// # Example TOML
/// ```toml
/// [output]
/// format = "jpg"
/// quality = 85
/// directory = "~/Pictures/Screenshots"
/// template = "screen_{datetime}"
///
/// [batch]
/// interval = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Clamps out-of-range values and replaces unknown formats, logging a
    /// warning for each correction.
    fn validate_and_clamp(&mut self) {
        if !(1..=100).contains(&self.output.quality) {
            log::warn!(
                "Invalid quality {}, clamping to 1-100 range",
                self.output.quality
            );
            self.output.quality = self.output.quality.clamp(1, 100);
        }

        if self.batch.interval < 1 {
            log::warn!(
                "Invalid batch interval {}, using 1 second",
                self.batch.interval
            );
            self.batch.interval = 1;
        }

        if self.output.format.parse::<ImageFormat>().is_err() {
            log::warn!(
                "Invalid format '{}', falling back to 'png'",
                self.output.format
            );
            self.output.format = "png".to_string();
        }

        if self.output.directory.trim().is_empty() {
            self.output.directory = ".".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(explicit));
        }

        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sshot");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(err) => {
                debug!("No config location available ({err:#}), using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from `config_path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
