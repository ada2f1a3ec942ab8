//! Library exports for the sshot screenshot tool.
//!
//! The binary is a thin wrapper around [`app::run`]; the naming, batch and
//! capture modules are usable on their own, with every platform collaborator
//! behind a trait in [`capture::dependencies`].

pub mod app;
pub mod batch;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod naming;
pub mod output;

pub use config::{CaptureConfig, Config};
pub use error::AppError;
