//! Error taxonomy for the StarReach pipeline.
//!
//! Per-row failures (`DetailError`, `ScrapeError`) are recorded on the
//! affected row and never abort a batch. `ConfigError` is fatal before
//! dispatch; `SourceError` and `ExportError` are the only failures that can
//! end a run once it has started.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors. Fatal: these abort the run before any dispatch.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API token was provided.
    #[error("GITHUB_TOKEN is not set (export it or pass --token)")]
    MissingToken,

    /// The repository reference could not be parsed.
    #[error("invalid repository reference '{input}': expected owner/repo or a GitHub URL")]
    InvalidRepoRef {
        /// The rejected input.
        input: String,
    },

    /// A configuration value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Typed failure of a single user's detail lookup.
///
/// Recorded on the row; distinguishes `RateLimited` (degraded but
/// recoverable by a later re-run) from terminal lookup failures. Carried
/// inside [`EnrichedRow`](crate::types::EnrichedRow), so it serializes
/// with the row.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailError {
    /// The API rate limit was hit and retries were exhausted.
    #[error("rate limited by the GitHub API")]
    RateLimited,

    /// The user no longer exists.
    #[error("user not found")]
    NotFound,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Failure while listing stargazers. Terminal for the run: without a user
/// list there is nothing to dispatch.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The API rejected the request.
    #[error("GitHub API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The API rate limit was hit while paginating.
    #[error("rate limited by the GitHub API while listing stargazers")]
    RateLimited,
}

/// Failure of a single scrape attempt, converted to a row-level
/// [`ScrapeStatus`](crate::types::ScrapeStatus) at the task boundary.
#[derive(Error, Debug, Clone)]
#[error("scrape failed: {0}")]
pub struct ScrapeError(pub String);

/// Failure while writing the output spreadsheet. Fatal, surfaced after all
/// processing: losing the artifact at the final step is unrecoverable
/// without a re-run.
#[derive(Error, Debug)]
#[error("export failed: {0}")]
pub struct ExportError(pub String);
