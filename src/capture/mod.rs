//! Screenshot capture functionality for sshot.
//!
//! This module provides:
//! - Full display and region capture targets
//! - The collaborator traits (capture, encode, save, clipboard) the batch
//!   scheduler is written against, with their default implementations
//! - Display enumeration for `sshot info`

pub mod dependencies;
pub mod sources;
pub mod types;

pub use dependencies::{CaptureDependencies, CaptureSource, ClipboardSink, FileSaver, ImageEncoder};
pub use types::{CaptureError, CaptureTarget, DisplayInfo, Region};
