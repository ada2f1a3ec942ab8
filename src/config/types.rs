//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Defaults for where and how screenshots are written.
///
/// Every field can be overridden by the matching command-line flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Image format: png, jpg, jpeg, bmp or gif
    #[serde(default = "default_format")]
    pub format: String,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_quality")]
    pub quality: i64,

    /// Directory screenshots are written to ("." keeps the output path as is)
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Value substituted for `{prefix}` in templates
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Filename template; empty disables templating
    #[serde(default)]
    pub template: String,

    /// Copy every screenshot to the clipboard
    #[serde(default)]
    pub clipboard: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            quality: default_quality(),
            directory: default_directory(),
            prefix: default_prefix(),
            template: String::new(),
            clipboard: false,
        }
    }
}

/// Batch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchConfig {
    /// Seconds to wait between screenshots (minimum 1)
    #[serde(default = "default_interval")]
    pub interval: i64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

fn default_format() -> String {
    "png".to_string()
}

fn default_quality() -> i64 {
    90
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_prefix() -> String {
    "shot".to_string()
}

fn default_interval() -> i64 {
    1
}
