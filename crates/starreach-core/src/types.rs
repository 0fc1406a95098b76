//! Data model shared across the StarReach pipeline.
//!
//! Records are created once by their producing stage and never mutated
//! afterwards; absence of enrichment data is always explicit (`Option` or a
//! recorded failure), never an error condition.

use crate::error::{ConfigError, DetailError};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A validated `owner/repo` reference.
///
/// Accepts either the bare `owner/repo` form or a full GitHub URL such as
/// `https://github.com/owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parse a repository reference from user input.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidRepoRef`] if the input does not contain
    /// a valid owner and repository name.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        static SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();
        let segment = SEGMENT_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid regex"));

        let trimmed = input
            .trim()
            .trim_start_matches("https://github.com/")
            .trim_start_matches("http://github.com/")
            .trim_start_matches("github.com/")
            .trim_end_matches('/');

        let mut parts = trimmed.split('/');
        let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigError::InvalidRepoRef {
                input: input.to_string(),
            });
        };

        if owner.is_empty() || name.is_empty() || !segment.is_match(owner) || !segment.is_match(name)
        {
            return Err(ConfigError::InvalidRepoRef {
                input: input.to_string(),
            });
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A user who starred the target repository.
///
/// Created by the list fetcher; read-only thereafter. Identity within a run
/// is `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StargazerRecord {
    /// GitHub login, unique within a run.
    pub login: String,
    /// URL of the user's GitHub profile page.
    pub profile_url: String,
    /// When the star was given, if the API reported it.
    pub joined_at: Option<DateTime<Utc>>,
}

/// Detailed profile information for a single user.
///
/// Created by the detail fetcher and attached to the matching
/// [`StargazerRecord`] by the orchestrator; never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetail {
    /// GitHub login this detail belongs to.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Personal website, the candidate URL for scraping.
    pub blog_url: Option<String>,
    /// Company field.
    pub company: Option<String>,
    /// Location field.
    pub location: Option<String>,
    /// Publicly listed email on the GitHub profile.
    pub public_email: Option<String>,
    /// Twitter handle.
    pub twitter: Option<String>,
}

/// Terminal outcome of a scrape attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    /// The page loaded and at least one contact field was found.
    Ok,
    /// The deadline guard fired before the session or page settled.
    Timeout,
    /// Nothing to scrape, or the page held no contact data. Not an error.
    NoData,
    /// The scrape failed (navigation error, browser fault).
    Error,
}

impl ScrapeStatus {
    /// Stable string form used in the export and in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Timeout => "timeout",
            Self::NoData => "no_data",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scraping one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The URL that was (or would have been) visited.
    pub source_url: Option<String>,
    /// First email address found in the rendered page.
    pub email: Option<String>,
    /// First LinkedIn profile URL found in the rendered page.
    pub linkedin_url: Option<String>,
    /// Terminal outcome.
    pub status: ScrapeStatus,
}

impl ScrapeResult {
    /// A scrape that never ran because no candidate URL was derivable.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            source_url: None,
            email: None,
            linkedin_url: None,
            status: ScrapeStatus::NoData,
        }
    }

    /// A scrape abandoned by the deadline guard.
    #[must_use]
    pub fn timed_out(source_url: String) -> Self {
        Self {
            source_url: Some(source_url),
            email: None,
            linkedin_url: None,
            status: ScrapeStatus::Timeout,
        }
    }

    /// A scrape that failed with a browser or navigation error.
    #[must_use]
    pub fn failed(source_url: String) -> Self {
        Self {
            source_url: Some(source_url),
            email: None,
            linkedin_url: None,
            status: ScrapeStatus::Error,
        }
    }

    /// A completed scrape. Status is `Ok` when at least one field was
    /// found, `NoData` otherwise.
    #[must_use]
    pub fn completed(
        source_url: String,
        email: Option<String>,
        linkedin_url: Option<String>,
    ) -> Self {
        let status = if email.is_some() || linkedin_url.is_some() {
            ScrapeStatus::Ok
        } else {
            ScrapeStatus::NoData
        };
        Self {
            source_url: Some(source_url),
            email,
            linkedin_url,
            status,
        }
    }
}

/// The merged, immutable output row for one stargazer.
///
/// Exactly one of `detail` / `detail_error` is set once the detail stage has
/// settled; `scrape` records the scrape stage's terminal outcome. Built once
/// per user, then ownership passes to the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRow {
    /// The stargazer this row traces to.
    pub record: StargazerRecord,
    /// Profile detail, when the lookup succeeded.
    pub detail: Option<ProfileDetail>,
    /// Recorded lookup failure, when it did not.
    pub detail_error: Option<DetailError>,
    /// Scrape stage outcome.
    pub scrape: Option<ScrapeResult>,
}

impl EnrichedRow {
    /// Start a row from its stargazer record.
    #[must_use]
    pub fn new(record: StargazerRecord) -> Self {
        Self {
            record,
            detail: None,
            detail_error: None,
            scrape: None,
        }
    }

    /// Attach a successful detail lookup.
    #[must_use]
    pub fn with_detail(mut self, detail: ProfileDetail) -> Self {
        debug_assert!(self.detail_error.is_none());
        self.detail = Some(detail);
        self
    }

    /// Record a failed detail lookup.
    #[must_use]
    pub fn with_detail_error(mut self, error: DetailError) -> Self {
        debug_assert!(self.detail.is_none());
        self.detail_error = Some(error);
        self
    }

    /// Attach the scrape stage outcome.
    #[must_use]
    pub fn with_scrape(mut self, scrape: ScrapeResult) -> Self {
        self.scrape = Some(scrape);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse_bare() {
        let repo = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(repo.owner(), "rust-lang");
        assert_eq!(repo.name(), "cargo");
        assert_eq!(repo.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_repo_ref_parse_url() {
        let repo = RepoRef::parse("https://github.com/octocat/Hello-World/").unwrap();
        assert_eq!(repo.owner(), "octocat");
        assert_eq!(repo.name(), "Hello-World");
    }

    #[test]
    fn test_repo_ref_rejects_garbage() {
        assert!(RepoRef::parse("").is_err());
        assert!(RepoRef::parse("just-a-name").is_err());
        assert!(RepoRef::parse("owner/repo/extra").is_err());
        assert!(RepoRef::parse("owner//").is_err());
        assert!(RepoRef::parse("ow ner/repo").is_err());
    }

    #[test]
    fn test_scrape_result_completed_status() {
        let found = ScrapeResult::completed(
            "https://example.com".to_string(),
            Some("a@example.com".to_string()),
            None,
        );
        assert_eq!(found.status, ScrapeStatus::Ok);

        let empty = ScrapeResult::completed("https://example.com".to_string(), None, None);
        assert_eq!(empty.status, ScrapeStatus::NoData);
    }

    #[test]
    fn test_scrape_result_skipped() {
        let skipped = ScrapeResult::skipped();
        assert_eq!(skipped.status, ScrapeStatus::NoData);
        assert!(skipped.source_url.is_none());
        assert!(skipped.email.is_none());
    }

    #[test]
    fn test_enriched_row_detail_exclusivity() {
        let record = StargazerRecord {
            login: "octocat".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
            joined_at: None,
        };

        let ok = EnrichedRow::new(record.clone()).with_detail(ProfileDetail {
            login: "octocat".to_string(),
            ..ProfileDetail::default()
        });
        assert!(ok.detail.is_some());
        assert!(ok.detail_error.is_none());

        let failed = EnrichedRow::new(record).with_detail_error(DetailError::NotFound);
        assert!(failed.detail.is_none());
        assert_eq!(failed.detail_error, Some(DetailError::NotFound));
    }

    #[test]
    fn test_enriched_row_round_trips_through_serde() {
        let record = StargazerRecord {
            login: "octocat".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
            joined_at: None,
        };
        let row = EnrichedRow::new(record)
            .with_detail_error(DetailError::RateLimited)
            .with_scrape(ScrapeResult::skipped());

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("rate_limited"));

        let back: EnrichedRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.record.login, "octocat");
        assert_eq!(back.detail_error, Some(DetailError::RateLimited));
        assert_eq!(back.scrape.unwrap().status, ScrapeStatus::NoData);
    }

    #[test]
    fn test_scrape_status_serde_form() {
        let json = serde_json::to_string(&ScrapeStatus::NoData).unwrap();
        assert_eq!(json, "\"no_data\"");
        assert_eq!(ScrapeStatus::Timeout.to_string(), "timeout");
    }
}
