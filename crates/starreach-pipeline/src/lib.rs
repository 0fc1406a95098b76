//! StarReach Pipeline - concurrent enrichment orchestration.
//!
//! This crate is the coordination core of StarReach: it fans out blocking
//! GitHub detail lookups and browser scrapes across two bounded slot pools,
//! keeps every blocking call off the scheduler thread, races hang-prone
//! browser sessions against a deadline, captures each task's terminal
//! outcome independently, and hands the assembled rows to the exporter
//! exactly once.
//!
//! # Guarantees
//!
//! - Exactly `min(limit, available_stargazers)` rows per run, one per user.
//! - Pool occupancy never exceeds the configured caps.
//! - A timed-out or failed task releases its slot and never blocks siblings.
//! - Per-user failures become row-level status; only pre-dispatch
//!   configuration errors and post-aggregation export errors end a run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod orchestrator;
pub mod pool;

pub use error::{PipelineError, Result};
pub use orchestrator::{Orchestrator, PipelineReport};
pub use pool::{SlotGuard, SlotPool};
