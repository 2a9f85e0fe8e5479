#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pipeline configuration.
pub mod config;

/// Error types for the pipeline.
pub mod error;

/// The per-participant driver of the pipeline phases.
pub mod participant;

/// Display of intermediate and final images.
pub mod viewer;

pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
pub use crate::participant::Participant;
pub use crate::viewer::{ImageViewer, LogViewer, NoopViewer};
