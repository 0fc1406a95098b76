//! starreach - enrich a repository's stargazers with contact info.
//!
//! Lists a repository's stargazers, looks up each profile, scrapes
//! personal websites for an email/LinkedIn, and writes the merged result
//! to a spreadsheet. Per-row failures never fail the run; only
//! configuration and export errors produce a non-zero exit.

use anyhow::{Context, Result};
use clap::Parser;
use starreach_browser::{BrowserEngine, ProfileScraper};
use starreach_core::{ConfigError, PipelineConfig, RepoRef};
use starreach_export::XlsxExporter;
use starreach_github::{GithubClient, GithubStargazerSource};
use starreach_pipeline::Orchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "starreach",
    version,
    about = "Fetch a repository's stargazers and enrich them with contact info"
)]
struct Cli {
    /// Repository to process, as owner/repo or a GitHub URL.
    repo: String,

    /// Maximum number of stargazers to process.
    #[arg(long)]
    limit: Option<usize>,

    /// Concurrent GitHub detail lookups.
    #[arg(long, default_value_t = starreach_core::config::DEFAULT_DETAIL_CONCURRENCY)]
    detail_concurrency: usize,

    /// Concurrent browser scrapes.
    #[arg(long, default_value_t = starreach_core::config::DEFAULT_SCRAPE_CONCURRENCY)]
    scrape_concurrency: usize,

    /// Deadline in seconds for a browser session plus page load.
    #[arg(long, default_value_t = 20)]
    session_timeout_secs: u64,

    /// Output spreadsheet path.
    #[arg(long, default_value = starreach_core::config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// GitHub API token. Never logged and never written to the output.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

// One cooperative scheduler thread; all blocking work goes through
// worker-thread offloads.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.verbose);

    let repo = RepoRef::parse(&cli.repo)?;
    let token = cli.token.filter(|t| !t.is_empty()).ok_or(ConfigError::MissingToken)?;

    let config = PipelineConfig {
        limit: cli.limit,
        detail_concurrency: cli.detail_concurrency,
        scrape_concurrency: cli.scrape_concurrency,
        session_timeout_ms: cli.session_timeout_secs.saturating_mul(1000),
        output_path: cli.output,
        ..PipelineConfig::default()
    };
    config.validate()?;

    tracing::info!(%repo, "fetching stargazers");

    let client = GithubClient::new(token)?;
    let source = GithubStargazerSource::new(client.clone(), repo);

    let engine = Arc::new(
        BrowserEngine::new()
            .await
            .context("failed to launch headless browser")?,
    );
    let scraper = Arc::new(ProfileScraper::new(engine, config.page_timeout()));

    let output_path = config.output_path.clone();
    let orchestrator = Orchestrator::new(
        Arc::new(client),
        scraper,
        Arc::new(XlsxExporter::new()),
        config,
    );

    let report = orchestrator.run(source).await?;

    println!(
        "Processed {} stargazers ({} emails found, {} detail failures, {} scrape timeouts)",
        report.rows, report.emails_found, report.detail_failures, report.scrape_timeouts
    );
    println!("Wrote {}", output_path.display());

    Ok(())
}

fn initialize_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["starreach", "owner/repo", "--token", "t"]).unwrap();
        assert_eq!(cli.detail_concurrency, 5);
        assert_eq!(cli.scrape_concurrency, 5);
        assert_eq!(cli.session_timeout_secs, 20);
        assert_eq!(cli.output, PathBuf::from("stargazers.xlsx"));
        assert!(cli.limit.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "starreach",
            "https://github.com/owner/repo",
            "--limit",
            "50",
            "--scrape-concurrency",
            "2",
            "--output",
            "out.xlsx",
            "--token",
            "t",
        ])
        .unwrap();
        assert_eq!(cli.limit, Some(50));
        assert_eq!(cli.scrape_concurrency, 2);
        assert_eq!(cli.output, PathBuf::from("out.xlsx"));
    }
}
