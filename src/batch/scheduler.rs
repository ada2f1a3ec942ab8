use std::{path::PathBuf, sync::Arc, time::Instant};

use image::RgbaImage;
use tokio::time::sleep;

use crate::batch::{
    pipeline,
    types::{BatchError, BatchStatus, BatchSummary, IterationOutcome, IterationReport},
};
use crate::capture::CaptureDependencies;
use crate::config::CaptureConfig;
use crate::naming::{TemplateContext, resolve_output_path};

/// Drives `count` sequential capture-and-save iterations.
///
/// Capture, encode and save failures abort the run; a failed clipboard copy
/// only flags the iteration. The reports and summary of a run stay available
/// through [`BatchScheduler::reports`] and [`BatchScheduler::summary`] after it
/// returns, including on abort.
pub struct BatchScheduler {
    dependencies: Arc<CaptureDependencies>,
    status: BatchStatus,
    reports: Vec<IterationReport>,
    summary: Option<BatchSummary>,
}

impl BatchScheduler {
    pub fn new(dependencies: Arc<CaptureDependencies>) -> Self {
        Self {
            dependencies,
            status: BatchStatus::Idle,
            reports: Vec::new(),
            summary: None,
        }
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn reports(&self) -> &[IterationReport] {
        &self.reports
    }

    /// Summary of the last finished or aborted run.
    pub fn summary(&self) -> Option<&BatchSummary> {
        self.summary.as_ref()
    }

    pub async fn run(&mut self, config: &CaptureConfig) -> Result<BatchSummary, BatchError> {
        self.reports.clear();
        self.summary = None;
        let started = Instant::now();
        let mut context = TemplateContext::new();

        println!(
            "Starting batch capture: {} screenshots, {} second intervals",
            config.count,
            config.interval.as_secs()
        );
        if config.verbose {
            println!("Output directory: {}", config.directory.display());
            println!("Format: {}, Quality: {}", config.format, config.quality);
        }

        for iteration in 1..=config.count {
            self.status = BatchStatus::Running { iteration };
            context.set_counter(iteration);

            let iteration_started = Instant::now();
            match self.save_iteration(config, &context, iteration).await {
                Ok(shot) => {
                    let mut report = shot.report;
                    println!(
                        "[{}/{}] Saved: {} ({}x{}) - {:?}",
                        iteration,
                        config.count,
                        report
                            .path
                            .as_deref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                        report.dimensions.map_or(0, |d| d.0),
                        report.dimensions.map_or(0, |d| d.1),
                        report.elapsed
                    );
                    if config.clipboard {
                        report.outcome = self
                            .copy_iteration(config, iteration, shot.image, shot.encoded)
                            .await;
                    }
                    self.reports.push(report);
                }
                Err((err, partial)) => {
                    log::error!("Batch aborted at iteration {}: {}", iteration, err);
                    self.reports.push(IterationReport {
                        iteration,
                        path: partial.path,
                        dimensions: partial.dimensions,
                        elapsed: iteration_started.elapsed(),
                        outcome: IterationOutcome::Failed(err.to_string()),
                    });
                    self.status = BatchStatus::Aborted { iteration };
                    let summary =
                        BatchSummary::from_reports(self.reports.clone(), started.elapsed());
                    println!("{}", summary.abort_message(iteration));
                    self.summary = Some(summary);
                    return Err(err);
                }
            }

            if iteration < config.count {
                log::debug!("Waiting {:?} before screenshot {}", config.interval, iteration + 1);
                sleep(config.interval).await;
            }
        }

        self.status = BatchStatus::Completed;
        let summary = BatchSummary::from_reports(self.reports.clone(), started.elapsed());
        println!("{}", summary.completion_message());
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Capture, resolve, encode and save one screenshot.
    async fn save_iteration(
        &self,
        config: &CaptureConfig,
        context: &TemplateContext,
        iteration: u32,
    ) -> Result<SavedShot, (BatchError, Partial)> {
        let started = Instant::now();
        let deps = &self.dependencies;
        let mut partial = Partial::default();

        let image = deps
            .source
            .capture(config.target)
            .await
            .map_err(|source| (BatchError::Capture { iteration, source }, partial.clone()))?;
        let image: Arc<RgbaImage> = Arc::new(image);
        partial.dimensions = Some(image.dimensions());

        let path = resolve_output_path(config, context);
        partial.path = Some(path.clone());
        log::debug!("Screenshot {} resolves to {}", iteration, path.display());

        let encoded = pipeline::encode_image(
            Arc::clone(&deps.encoder),
            Arc::clone(&image),
            config.format,
            config.quality,
        )
        .await
        .map_err(|source| (BatchError::Encode { iteration, source }, partial.clone()))?;
        let encoded = Arc::new(encoded);

        let saved = pipeline::save_image(Arc::clone(&deps.saver), path, Arc::clone(&encoded))
            .await
            .map_err(|source| (BatchError::Persist { iteration, source }, partial.clone()))?;

        Ok(SavedShot {
            report: IterationReport {
                iteration,
                path: Some(saved),
                dimensions: partial.dimensions,
                elapsed: started.elapsed(),
                outcome: IterationOutcome::Saved,
            },
            image,
            encoded,
        })
    }

    /// Clipboard copy after a successful save. Failures never abort the run.
    async fn copy_iteration(
        &self,
        config: &CaptureConfig,
        iteration: u32,
        image: Arc<RgbaImage>,
        encoded: Arc<Vec<u8>>,
    ) -> IterationOutcome {
        let deps = &self.dependencies;
        let copied = pipeline::copy_png_to_clipboard(
            Arc::clone(&deps.encoder),
            Arc::clone(&deps.clipboard),
            image,
            config.format,
            Some(encoded),
        )
        .await;

        match copied {
            Ok(()) => IterationOutcome::Saved,
            Err(err) => {
                log::info!("Clipboard copy failed for screenshot {}: {}", iteration, err);
                println!(
                    "Warning: failed to copy screenshot {} to clipboard: {}",
                    iteration, err
                );
                IterationOutcome::ClipboardWarning(err.to_string())
            }
        }
    }
}

/// A saved iteration, with what the clipboard step still needs.
struct SavedShot {
    report: IterationReport,
    image: Arc<RgbaImage>,
    encoded: Arc<Vec<u8>>,
}

/// What an iteration had established before it failed.
#[derive(Debug, Clone, Default)]
struct Partial {
    path: Option<PathBuf>,
    dimensions: Option<(u32, u32)>,
}
