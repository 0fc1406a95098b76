//! The enrichment orchestrator.
//!
//! Owns the worker pools, the timeout policy, and result aggregation. Pulls
//! stargazer pages lazily, dispatches one task per user, and merges each
//! task's terminal outcome into that user's row. Batch completion depends
//! only on all tasks reaching a terminal state, never on all of them
//! succeeding.

use crate::error::{PipelineError, Result};
use crate::pool::SlotPool;
use futures::stream::{FuturesUnordered, StreamExt};
use starreach_core::{
    DetailError, DetailLookup, EnrichedRow, PipelineConfig, RowExporter, ScrapeResult,
    ScrapeStatus, StargazerRecord, StargazerSource, WebsiteScraper,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Rows written to the spreadsheet.
    pub rows: usize,
    /// Rows whose detail lookup failed.
    pub detail_failures: usize,
    /// Rows whose scrape hit the deadline guard.
    pub scrape_timeouts: usize,
    /// Rows with a scraped email address.
    pub emails_found: usize,
    /// Where the spreadsheet was written.
    pub output_path: PathBuf,
}

/// Coordinates detail lookups, scrapes, and the export handoff.
pub struct Orchestrator<D, S, E> {
    detail: Arc<D>,
    scraper: Arc<S>,
    exporter: Arc<E>,
    config: PipelineConfig,
}

impl<D, S, E> Orchestrator<D, S, E>
where
    D: DetailLookup + 'static,
    S: WebsiteScraper + 'static,
    E: RowExporter + 'static,
{
    /// Create an orchestrator over the three collaborators.
    #[must_use]
    pub fn new(detail: Arc<D>, scraper: Arc<S>, exporter: Arc<E>, config: PipelineConfig) -> Self {
        Self {
            detail,
            scraper,
            exporter,
            config,
        }
    }

    /// Run the full pipeline: list, enrich, aggregate, export.
    ///
    /// Produces exactly `min(limit, available_stargazers)` rows. Per-user
    /// failures are recorded on their rows; only configuration errors
    /// (pre-dispatch), a listing failure before any dispatch, and export
    /// failures (post-aggregation) surface as `Err`.
    pub async fn run<L: StargazerSource>(&self, mut source: L) -> Result<PipelineReport> {
        self.config.validate()?;

        let detail_pool = SlotPool::new(self.config.detail_concurrency);
        let scrape_pool = SlotPool::new(self.config.scrape_concurrency);

        let limit = self.config.limit.unwrap_or(usize::MAX);
        // Bound on futures materialized at once; the pools bound what
        // actually runs.
        let max_in_flight = self.config.detail_concurrency + self.config.scrape_concurrency;

        let mut in_flight = FuturesUnordered::new();
        let mut rows: Vec<EnrichedRow> = Vec::new();
        let mut dispatched = 0_usize;

        'listing: loop {
            let page = match source.next_page().await {
                Ok(page) => page,
                Err(e) if dispatched == 0 => return Err(PipelineError::Source(e)),
                Err(e) => {
                    // Mid-run listing failure: keep what we have, the
                    // batch must not abort.
                    tracing::error!("stargazer listing failed mid-run: {e}");
                    break 'listing;
                }
            };
            if page.is_empty() {
                break;
            }

            for record in page {
                if dispatched >= limit {
                    break 'listing;
                }
                dispatched += 1;
                in_flight.push(self.process_user(record, &detail_pool, &scrape_pool));

                while in_flight.len() >= max_in_flight {
                    if let Some(row) = in_flight.next().await {
                        rows.push(row);
                    }
                }
            }
        }

        tracing::info!(dispatched, "all users dispatched, draining in-flight tasks");
        while let Some(row) = in_flight.next().await {
            rows.push(row);
        }

        debug_assert_eq!(rows.len(), dispatched);
        debug_assert!(detail_pool.high_water() <= detail_pool.cap());
        debug_assert!(scrape_pool.high_water() <= scrape_pool.cap());

        let report = PipelineReport {
            rows: rows.len(),
            detail_failures: rows.iter().filter(|r| r.detail_error.is_some()).count(),
            scrape_timeouts: rows
                .iter()
                .filter(|r| {
                    r.scrape
                        .as_ref()
                        .is_some_and(|s| s.status == ScrapeStatus::Timeout)
                })
                .count(),
            emails_found: rows
                .iter()
                .filter(|r| r.scrape.as_ref().is_some_and(|s| s.email.is_some()))
                .count(),
            output_path: self.config.output_path.clone(),
        };

        self.export(rows).await?;

        tracing::info!(
            rows = report.rows,
            detail_failures = report.detail_failures,
            scrape_timeouts = report.scrape_timeouts,
            emails_found = report.emails_found,
            "pipeline complete"
        );
        Ok(report)
    }

    /// Enrich one user. Infallible by construction: every failure mode is
    /// folded into the returned row.
    async fn process_user(
        &self,
        record: StargazerRecord,
        detail_pool: &SlotPool,
        scrape_pool: &SlotPool,
    ) -> EnrichedRow {
        let login = record.login.clone();
        let row = EnrichedRow::new(record);

        // Detail stage: blocking HTTP under a worker-thread offload. The
        // slot guard drops at the end of the block on every path.
        let detail_outcome = {
            let _slot = detail_pool.acquire().await;
            let detail = Arc::clone(&self.detail);
            let lookup_login = login.clone();
            tokio::task::spawn_blocking(move || detail.lookup(&lookup_login))
                .await
                .unwrap_or_else(|e| {
                    Err(DetailError::Network(format!("detail worker failed: {e}")))
                })
        };

        let row = match detail_outcome {
            Ok(detail) => row.with_detail(detail),
            Err(error) => {
                if error == DetailError::RateLimited {
                    tracing::warn!(%login, "detail lookup rate limited, recorded on row");
                } else {
                    tracing::debug!(%login, %error, "detail lookup failed");
                }
                return row
                    .with_detail_error(error)
                    .with_scrape(ScrapeResult::skipped());
            }
        };

        let Some(blog) = row.detail.as_ref().and_then(|d| d.blog_url.clone()) else {
            return row.with_scrape(ScrapeResult::skipped());
        };

        // Scrape stage: session creation can hang indefinitely, so the
        // wait races a deadline. The scrape runs as its own task: expiry
        // abandons the wait, not the work, so the task still reaches its
        // page-close path while the slot guard drops here.
        let scrape = {
            let _slot = scrape_pool.acquire().await;
            let deadline = self.config.session_timeout();
            let scraper = Arc::clone(&self.scraper);
            let target = blog.clone();
            let handle = tokio::spawn(async move { scraper.scrape(&target).await });
            match tokio::time::timeout(deadline, handle).await {
                Ok(Ok(Ok(result))) => result,
                Ok(Ok(Err(error))) => {
                    tracing::debug!(%login, url = %blog, %error, "scrape failed");
                    ScrapeResult::failed(blog)
                }
                Ok(Err(join_error)) => {
                    tracing::debug!(%login, url = %blog, "scrape worker failed: {join_error}");
                    ScrapeResult::failed(blog)
                }
                Err(_) => {
                    tracing::warn!(%login, url = %blog, "scrape abandoned at {deadline:?} deadline");
                    ScrapeResult::timed_out(blog)
                }
            }
        };

        row.with_scrape(scrape)
    }

    /// Hand the rows to the exporter, exactly once, off the scheduler
    /// thread.
    async fn export(&self, rows: Vec<EnrichedRow>) -> Result<()> {
        let exporter = Arc::clone(&self.exporter);
        let path = self.config.output_path.clone();

        tokio::task::spawn_blocking(move || exporter.export(rows, &path))
            .await
            .map_err(|e| PipelineError::Offload(e.to_string()))??;

        Ok(())
    }
}
