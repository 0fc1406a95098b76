//! Run-ending pipeline failures.
//!
//! Everything per-user is captured at the task boundary and recorded on the
//! row instead of surfacing here.

use starreach_core::{ConfigError, ExportError, SourceError};
use thiserror::Error;

/// Result type alias using [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A failure that legitimately ends a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration, rejected before any dispatch.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The stargazer listing failed before any user was dispatched.
    #[error("stargazer listing failed: {0}")]
    Source(#[from] SourceError),

    /// The spreadsheet could not be written after aggregation.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A worker-thread offload failed to complete (panic or cancellation).
    #[error("worker thread failed: {0}")]
    Offload(String),
}
