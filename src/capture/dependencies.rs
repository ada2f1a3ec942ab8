use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use image::RgbaImage;

use crate::capture::{
    sources,
    types::{CaptureError, CaptureTarget, DisplayInfo},
};
use crate::output::{self, ClipboardChain, ImageFormat, OutputError};

/// Abstraction over how pixels are obtained for a capture target.
#[async_trait]
pub trait CaptureSource: Send + Sync {
    async fn capture(&self, target: CaptureTarget) -> Result<RgbaImage, CaptureError>;

    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError>;
}

/// Abstraction over turning a bitmap into file bytes.
pub trait ImageEncoder: Send + Sync {
    fn encode(
        &self,
        image: &RgbaImage,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Vec<u8>, OutputError>;
}

/// Abstraction over file saving for captured screenshots.
pub trait FileSaver: Send + Sync {
    fn save(&self, path: &Path, image_data: &[u8]) -> Result<PathBuf, OutputError>;
}

/// Abstraction over copying screenshots to the clipboard.
pub trait ClipboardSink: Send + Sync {
    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError>;
}

/// Bundle of collaborators used by the batch scheduler. Each component can be mocked in tests.
#[derive(Clone)]
pub struct CaptureDependencies {
    pub source: Arc<dyn CaptureSource>,
    pub encoder: Arc<dyn ImageEncoder>,
    pub saver: Arc<dyn FileSaver>,
    pub clipboard: Arc<dyn ClipboardSink>,
}

impl Default for CaptureDependencies {
    fn default() -> Self {
        Self {
            source: sources::platform_source(),
            encoder: Arc::new(DefaultEncoder),
            saver: Arc::new(AtomicFileSaver),
            clipboard: Arc::new(ClipboardChain::for_current_platform()),
        }
    }
}

struct DefaultEncoder;
struct AtomicFileSaver;

impl ImageEncoder for DefaultEncoder {
    fn encode(
        &self,
        image: &RgbaImage,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Vec<u8>, OutputError> {
        output::encode_image(image, format, quality)
    }
}

impl FileSaver for AtomicFileSaver {
    fn save(&self, path: &Path, image_data: &[u8]) -> Result<PathBuf, OutputError> {
        output::file::save_image(path, image_data)
    }
}

impl ClipboardSink for ClipboardChain {
    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        ClipboardChain::copy(self, png_data)
    }
}
