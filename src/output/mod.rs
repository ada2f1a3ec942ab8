//! Everything that happens to a screenshot after it has been captured:
//! encoding, writing to disk and copying to the clipboard.

pub mod clipboard;
pub mod file;
pub mod format;

use std::path::PathBuf;
use thiserror::Error;

pub use clipboard::{ClipboardChain, ClipboardStrategy};
pub use format::{ImageFormat, encode_image, has_image_extension};

/// Errors raised by the output side of the pipeline.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to encode {format} image: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("background task failed: {0}")]
    TaskFailed(String),
}
