//! Batch capture: repeated capture-and-save on a fixed interval, plus the
//! single-shot path used when only one screenshot is requested.

mod pipeline;
mod scheduler;
mod single;
pub mod types;

pub use scheduler::BatchScheduler;
pub use single::{SingleShotResult, capture_once};
pub use types::{BatchError, BatchStatus, BatchSummary, IterationOutcome, IterationReport};
