//! Ties the command line to the capture pipeline.

use std::sync::Arc;

use crate::batch::{BatchScheduler, capture_once};
use crate::capture::{CaptureDependencies, sources};
use crate::cli::{Cli, Command};
use crate::config::{CaptureConfig, Config};
use crate::error::AppError;
use crate::output::clipboard::{self, ClipboardChain};

/// Run the parsed command line against `dependencies`.
pub async fn run(cli: Cli, dependencies: CaptureDependencies) -> Result<(), AppError> {
    if cli.command == Some(Command::Info) {
        return show_info(&dependencies, cli.verbose);
    }

    let file_config = Config::load().map_err(AppError::ConfigFile)?;
    let config = cli.into_config(&file_config)?;
    if config.verbose {
        println!("Configuration: {:?}", config);
    }

    run_capture(&config, dependencies).await
}

/// Batch mode when `count > 1`, otherwise a single shot.
pub async fn run_capture(
    config: &CaptureConfig,
    dependencies: CaptureDependencies,
) -> Result<(), AppError> {
    if config.is_batch() {
        let mut scheduler = BatchScheduler::new(Arc::new(dependencies));
        scheduler.run(config).await?;
    } else {
        let result = capture_once(&dependencies, config).await?;
        log::info!(
            "Captured {}x{} screenshot (saved: {:?}, clipboard: {})",
            result.dimensions.0,
            result.dimensions.1,
            result.saved_path,
            result.copied_to_clipboard
        );
    }
    Ok(())
}

fn show_info(dependencies: &CaptureDependencies, verbose: bool) -> Result<(), AppError> {
    if !sources::is_platform_supported() {
        println!("Platform not supported: {}", sources::platform_info());
        return Ok(());
    }

    let displays = dependencies
        .source
        .displays()
        .map_err(AppError::DisplayInfo)?;

    println!("Platform: {}", sources::platform_info());
    println!("Active displays: {}", displays.len());
    println!();

    for display in &displays {
        println!("Display {}:", display.index);
        println!("  Name: {}", display.name);
        println!("  Bounds: {}", display.bounds());
        println!("  Size: {}x{}", display.width, display.height);
        println!("  Position: ({}, {})", display.x, display.y);
        if verbose {
            println!("  Primary: {}", if display.is_primary { "yes" } else { "no" });
            println!("  Scale factor: {:.2}", display.scale_factor);
        }
        println!();
    }

    println!(
        "Image clipboard: {}",
        if clipboard::is_clipboard_available() {
            "available"
        } else {
            "unavailable"
        }
    );
    if verbose {
        let chain = ClipboardChain::for_current_platform();
        println!("Clipboard methods: {}", chain.strategy_names().join(", "));
    }
    Ok(())
}
