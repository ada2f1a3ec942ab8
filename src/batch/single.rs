//! The `count == 1` path: capture once, copy and/or save, no renaming, no sleep.

use std::{path::PathBuf, sync::Arc};

use crate::batch::{pipeline, types::BatchError};
use crate::capture::CaptureDependencies;
use crate::config::CaptureConfig;
use crate::naming::{TemplateContext, resolve_output_path};

/// What a single shot produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleShotResult {
    pub saved_path: Option<PathBuf>,
    pub copied_to_clipboard: bool,
    pub dimensions: (u32, u32),
}

/// Capture one screenshot.
///
/// A clipboard failure is fatal only when the clipboard is the sole
/// destination; when a file is also being written it is logged and the save
/// still happens.
pub async fn capture_once(
    dependencies: &CaptureDependencies,
    config: &CaptureConfig,
) -> Result<SingleShotResult, BatchError> {
    let iteration = 1;
    let image = dependencies
        .source
        .capture(config.target)
        .await
        .map_err(|source| BatchError::Capture { iteration, source })?;
    let dimensions = image.dimensions();
    let image = Arc::new(image);
    let saves_to_file = config.saves_to_file();

    let mut copied_to_clipboard = false;
    if config.clipboard {
        let copied = pipeline::copy_png_to_clipboard(
            Arc::clone(&dependencies.encoder),
            Arc::clone(&dependencies.clipboard),
            Arc::clone(&image),
            config.format,
            None,
        )
        .await;

        match copied {
            Ok(()) => {
                copied_to_clipboard = true;
                if config.verbose {
                    println!("Screenshot copied to clipboard");
                }
            }
            Err(err) if !saves_to_file => return Err(BatchError::Clipboard(err)),
            Err(err) => {
                log::info!("Clipboard copy failed, still saving to file: {}", err);
                println!("Warning: failed to copy screenshot to clipboard: {}", err);
            }
        }
    }

    let saved_path = if saves_to_file {
        let path = resolve_output_path(config, &TemplateContext::new());
        let encoded = pipeline::encode_image(
            Arc::clone(&dependencies.encoder),
            Arc::clone(&image),
            config.format,
            config.quality,
        )
        .await
        .map_err(|source| BatchError::Encode { iteration, source })?;
        let saved = pipeline::save_image(
            Arc::clone(&dependencies.saver),
            path,
            Arc::new(encoded),
        )
        .await
        .map_err(|source| BatchError::Persist { iteration, source })?;
        if config.verbose {
            println!("Screenshot saved to: {}", saved.display());
        }
        Some(saved)
    } else {
        log::debug!("No output path configured, skipping file save");
        None
    };

    Ok(SingleShotResult {
        saved_path,
        copied_to_clipboard,
        dimensions,
    })
}
