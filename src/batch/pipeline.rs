use std::{path::PathBuf, sync::Arc};

use image::RgbaImage;
use tokio::task;

use crate::capture::{ClipboardSink, FileSaver, ImageEncoder};
use crate::output::{ImageFormat, OutputError};

// Encoding, disk and clipboard work is blocking. Each helper runs it off the
// async executor and waits for it, so steps still complete strictly in order.

pub(crate) async fn encode_image(
    encoder: Arc<dyn ImageEncoder>,
    image: Arc<RgbaImage>,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, OutputError> {
    task::spawn_blocking(move || encoder.encode(&image, format, quality))
        .await
        .map_err(|e| OutputError::TaskFailed(format!("Encode task failed: {}", e)))?
}

pub(crate) async fn save_image(
    saver: Arc<dyn FileSaver>,
    path: PathBuf,
    image_data: Arc<Vec<u8>>,
) -> Result<PathBuf, OutputError> {
    task::spawn_blocking(move || saver.save(&path, &image_data))
        .await
        .map_err(|e| OutputError::TaskFailed(format!("Save task failed: {}", e)))?
}

pub(crate) async fn copy_to_clipboard(
    clipboard: Arc<dyn ClipboardSink>,
    png_data: Arc<Vec<u8>>,
) -> Result<(), OutputError> {
    task::spawn_blocking(move || clipboard.copy(&png_data))
        .await
        .map_err(|e| OutputError::TaskFailed(format!("Clipboard task failed: {}", e)))?
}

/// PNG bytes for the clipboard, reusing `encoded` when it already is PNG.
pub(crate) async fn clipboard_payload(
    encoder: Arc<dyn ImageEncoder>,
    image: Arc<RgbaImage>,
    format: ImageFormat,
    encoded: Option<Arc<Vec<u8>>>,
) -> Result<Arc<Vec<u8>>, OutputError> {
    match encoded {
        Some(bytes) if format == ImageFormat::Png => Ok(bytes),
        _ => Ok(Arc::new(
            encode_image(encoder, image, ImageFormat::Png, 100).await?,
        )),
    }
}

/// Convert to PNG if needed and hand the bytes to the clipboard.
pub(crate) async fn copy_png_to_clipboard(
    encoder: Arc<dyn ImageEncoder>,
    clipboard: Arc<dyn ClipboardSink>,
    image: Arc<RgbaImage>,
    format: ImageFormat,
    encoded: Option<Arc<Vec<u8>>>,
) -> Result<(), OutputError> {
    let payload = clipboard_payload(encoder, image, format, encoded).await?;
    copy_to_clipboard(clipboard, payload).await
}
