//! StarReach GitHub - stargazer listing and profile detail lookup.
//!
//! This crate implements the two GitHub-facing collaborators of the
//! pipeline: a paginated stargazer list fetcher and a per-user detail
//! lookup. Both ride on a synchronous HTTP client with bounded retry and
//! typed rate-limit handling; the orchestrator (or the async trait
//! adapter in [`source`]) keeps the blocking calls off the scheduler
//! thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod pagination;
pub mod source;

pub use client::{GithubClient, StargazerPage};
pub use error::{GithubError, Result};
pub use source::GithubStargazerSource;
