//! Data types for batch capture runs.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::capture::CaptureError;
use crate::output::OutputError;

/// Where a scheduler is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Idle,
    Running { iteration: u32 },
    Completed,
    /// Stopped by a fatal failure in `iteration`.
    Aborted { iteration: u32 },
}

/// How a single iteration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    Saved,
    /// Saved, but the clipboard copy failed.
    ClipboardWarning(String),
    Failed(String),
}

impl IterationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, IterationOutcome::Failed(_))
    }
}

/// Record of one capture-and-save cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    pub iteration: u32,
    /// `None` if the iteration failed before a path was resolved.
    pub path: Option<PathBuf>,
    pub dimensions: Option<(u32, u32)>,
    pub elapsed: Duration,
    pub outcome: IterationOutcome,
}

/// Aggregate over a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: u32,
    pub succeeded: u32,
    pub elapsed: Duration,
    pub reports: Vec<IterationReport>,
}

impl BatchSummary {
    pub fn from_reports(reports: Vec<IterationReport>, elapsed: Duration) -> Self {
        let attempted = reports.len() as u32;
        let succeeded = reports.iter().filter(|r| r.outcome.is_success()).count() as u32;
        Self {
            attempted,
            succeeded,
            elapsed,
            reports,
        }
    }

    /// Final stdout line of a run that reached `count`.
    pub fn completion_message(&self) -> String {
        format!(
            "Batch capture completed: {} attempted, {} succeeded in {:?}",
            self.attempted, self.succeeded, self.elapsed
        )
    }

    /// Final stdout line of a run stopped by a fatal failure in `iteration`.
    pub fn abort_message(&self, iteration: u32) -> String {
        format!(
            "Batch stopped at screenshot {}: {} attempted, {} succeeded in {:?}",
            iteration, self.attempted, self.succeeded, self.elapsed
        )
    }

    pub fn clipboard_warnings(&self) -> impl Iterator<Item = &IterationReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, IterationOutcome::ClipboardWarning(_)))
    }
}

/// Failures that end a run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to capture screenshot {iteration}: {source}")]
    Capture {
        iteration: u32,
        #[source]
        source: CaptureError,
    },

    #[error("failed to encode screenshot {iteration}: {source}")]
    Encode {
        iteration: u32,
        #[source]
        source: OutputError,
    },

    #[error("failed to save screenshot {iteration}: {source}")]
    Persist {
        iteration: u32,
        #[source]
        source: OutputError,
    },

    /// Only raised when the clipboard is the sole destination of a single shot.
    #[error("failed to copy to clipboard: {0}")]
    Clipboard(#[source] OutputError),
}

impl BatchError {
    pub fn iteration(&self) -> Option<u32> {
        match self {
            BatchError::Capture { iteration, .. }
            | BatchError::Encode { iteration, .. }
            | BatchError::Persist { iteration, .. } => Some(*iteration),
            BatchError::Clipboard(_) => None,
        }
    }
}
