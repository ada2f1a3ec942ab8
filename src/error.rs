//! Top-level error type and process exit codes.

use thiserror::Error;

use crate::batch::BatchError;
use crate::capture::CaptureError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ARGUMENT_ERROR: i32 = 1;
pub const EXIT_FILE_ERROR: i32 = 2;
pub const EXIT_CAPTURE_ERROR: i32 = 3;
pub const EXIT_FORMAT_ERROR: i32 = 4;
pub const EXIT_CLIPBOARD_ERROR: i32 = 5;

/// Invalid command-line values, detected before any capture is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid region format: {0}")]
    InvalidRegion(String),

    #[error("quality must be between 1 and 100 (got {0})")]
    InvalidQuality(i64),

    #[error("count must be at least 1 (got {0})")]
    InvalidCount(i64),

    #[error("interval must be at least 1 second (got {0})")]
    InvalidInterval(i64),

    #[error("display index must be non-negative (got {0})")]
    InvalidDisplay(i64),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to parse arguments: {0}")]
    Arguments(#[from] ConfigError),

    #[error("{0:#}")]
    ConfigFile(anyhow::Error),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("failed to get display info: {0}")]
    DisplayInfo(#[source] CaptureError),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl AppError {
    /// Maps the error onto the documented process exit codes.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Arguments(ConfigError::UnsupportedFormat(_)) => EXIT_FORMAT_ERROR,
            AppError::Arguments(_) | AppError::ConfigFile(_) => EXIT_ARGUMENT_ERROR,
            AppError::Batch(err) => match err {
                BatchError::Capture { .. } => EXIT_CAPTURE_ERROR,
                BatchError::Encode { .. } => EXIT_FORMAT_ERROR,
                BatchError::Persist { .. } => EXIT_FILE_ERROR,
                BatchError::Clipboard(_) => EXIT_CLIPBOARD_ERROR,
            },
            AppError::DisplayInfo(_) => EXIT_CAPTURE_ERROR,
            AppError::Runtime(_) => EXIT_CAPTURE_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputError;
    use std::path::PathBuf;

    #[test]
    fn argument_errors_map_to_one_except_format() {
        assert_eq!(
            AppError::from(ConfigError::InvalidQuality(0)).exit_code(),
            EXIT_ARGUMENT_ERROR
        );
        assert_eq!(
            AppError::from(ConfigError::UnsupportedFormat("tiff".into())).exit_code(),
            EXIT_FORMAT_ERROR
        );
    }

    #[test]
    fn batch_errors_map_by_stage() {
        let capture = AppError::from(BatchError::Capture {
            iteration: 2,
            source: CaptureError::NoDisplays,
        });
        assert_eq!(capture.exit_code(), EXIT_CAPTURE_ERROR);

        let persist = AppError::from(BatchError::Persist {
            iteration: 1,
            source: OutputError::Io {
                path: PathBuf::from("/nope/shot.png"),
                source: std::io::Error::other("denied"),
            },
        });
        assert_eq!(persist.exit_code(), EXIT_FILE_ERROR);

        let clipboard = AppError::from(BatchError::Clipboard(OutputError::Clipboard(
            "no utility".into(),
        )));
        assert_eq!(clipboard.exit_code(), EXIT_CLIPBOARD_ERROR);
    }
}
