//! The validated, immutable settings for one run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::capture::CaptureTarget;
use crate::output::ImageFormat;

/// Sentinel meaning "do not override the directory of the output path".
pub const CURRENT_DIRECTORY: &str = ".";

/// Built once from flags and the config file before any capture begins.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Output file path used when no template is set. Empty means
    /// "do not save" (clipboard-only single shot).
    pub output_path: String,
    pub target: CaptureTarget,
    pub format: ImageFormat,
    /// 1..=100
    pub quality: u8,
    pub clipboard: bool,
    pub template: Option<String>,
    /// At least 1
    pub count: u32,
    /// At least one second
    pub interval: Duration,
    pub prefix: String,
    pub directory: PathBuf,
    pub verbose: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_path: "screenshot.png".to_string(),
            target: CaptureTarget::Display(0),
            format: ImageFormat::Png,
            quality: 90,
            clipboard: false,
            template: None,
            count: 1,
            interval: Duration::from_secs(1),
            prefix: "shot".to_string(),
            directory: PathBuf::from(CURRENT_DIRECTORY),
            verbose: false,
        }
    }
}

impl CaptureConfig {
    pub fn is_batch(&self) -> bool {
        self.count > 1
    }

    /// Whether the configured directory replaces the output path's own directory.
    pub fn overrides_directory(&self) -> bool {
        let dir = self.directory.as_path();
        !(dir.as_os_str().is_empty() || dir == Path::new(CURRENT_DIRECTORY))
    }

    /// False only for the clipboard-only single shot (`-o ""` without a template).
    pub fn saves_to_file(&self) -> bool {
        self.template.is_some() || !self.output_path.is_empty()
    }
}
