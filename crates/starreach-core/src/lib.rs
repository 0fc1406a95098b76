//! StarReach Core - Foundation crate for the StarReach enrichment pipeline.
//!
//! This crate provides the shared data model, error taxonomy, pipeline
//! configuration, and the collaborator traits that the orchestrator is
//! written against (and tested against with mocks).
//!
//! # Modules
//!
//! - [`error`] - Error taxonomy using thiserror
//! - [`config`] - Pipeline configuration with validation
//! - [`types`] - Data model (`StargazerRecord`, `ProfileDetail`, `ScrapeResult`, `EnrichedRow`)
//! - [`traits`] - Collaborator seams (`StargazerSource`, `DetailLookup`, `WebsiteScraper`, `RowExporter`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{ConfigError, DetailError, ExportError, ScrapeError, SourceError};
pub use traits::{DetailLookup, RowExporter, StargazerSource, WebsiteScraper};
pub use types::{EnrichedRow, ProfileDetail, RepoRef, ScrapeResult, ScrapeStatus, StargazerRecord};
