//! Collaborator seams consumed by the orchestrator.
//!
//! The pipeline core is written against these traits so the concrete
//! GitHub client, browser scraper, and spreadsheet writer can be swapped
//! for mocks in tests.

use crate::error::{DetailError, ExportError, ScrapeError, SourceError};
use crate::types::{EnrichedRow, ProfileDetail, ScrapeResult, StargazerRecord};
use async_trait::async_trait;
use std::path::Path;

/// A paginated, finite source of stargazer records.
///
/// Implementations fetch one page per call and return an empty vector once
/// exhausted. The implementation is responsible for keeping its own blocking
/// I/O off the scheduler thread.
#[async_trait]
pub trait StargazerSource: Send {
    /// Fetch the next page of stargazers, empty when exhausted.
    async fn next_page(&mut self) -> Result<Vec<StargazerRecord>, SourceError>;
}

/// A blocking per-user profile lookup.
///
/// Calls block the current thread; the orchestrator runs them under a
/// worker-thread offload, never on the scheduler thread.
pub trait DetailLookup: Send + Sync {
    /// Look up profile detail for a login.
    fn lookup(&self, login: &str) -> Result<ProfileDetail, DetailError>;
}

/// A browser-backed website scraper.
///
/// One call owns one browser session; the session must be released on every
/// exit path. Calls are slow and hang-prone, so the orchestrator races each
/// one against a deadline. Implementations must tolerate being abandoned
/// mid-flight.
#[async_trait]
pub trait WebsiteScraper: Send + Sync {
    /// Visit `url` and extract contact information from the rendered page.
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeError>;
}

/// A blocking spreadsheet writer.
///
/// Takes ownership of the rows; invoked exactly once per run, under a
/// worker-thread offload.
pub trait RowExporter: Send + Sync {
    /// Write all rows to `path`.
    fn export(&self, rows: Vec<EnrichedRow>, path: &Path) -> Result<(), ExportError>;
}
