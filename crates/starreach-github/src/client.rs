//! Synchronous GitHub REST v3 client.
//!
//! Blocking by design: the pipeline treats GitHub lookups as a
//! non-cooperating subsystem and runs every call under a worker-thread
//! offload. The client retries transient failures internally with
//! exponential backoff, so callers see at most one terminal outcome per
//! request.

use crate::error::{GithubError, Result};
use crate::pagination;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use starreach_core::{DetailError, DetailLookup, ProfileDetail, RepoRef, StargazerRecord};
use std::time::Duration;

/// Public API root.
const API_ROOT: &str = "https://api.github.com";

/// Media type that includes `starred_at` in stargazer listings.
const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

/// Standard v3 media type for everything else.
const MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// User agent sent with every request. GitHub rejects anonymous agents.
const USER_AGENT: &str = "starreach/0.1";

/// Stargazers fetched per page (GitHub maximum).
const PER_PAGE: u32 = 100;

/// Maximum number of retry attempts for transient errors.
const MAX_RETRIES: u32 = 3;

/// Base delay in milliseconds for retry backoff.
const RETRY_DELAY_MS: u64 = 1_000;

/// Rate limit backoff multiplier (longer wait for rate limits).
const RATE_LIMIT_BACKOFF_MULTIPLIER: u64 = 3;

/// Per-request timeout for the underlying HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One page of stargazers plus the cursor to the next one.
#[derive(Debug, Clone)]
pub struct StargazerPage {
    /// Records on this page, in API order.
    pub records: Vec<StargazerRecord>,
    /// URL of the next page, `None` on the last page.
    pub next: Option<String>,
}

/// Blocking GitHub API client.
///
/// Cheap to clone: the inner `reqwest::blocking::Client` is an `Arc` around
/// its connection pool and is documented thread-safe, so one client is
/// shared across all offloaded calls.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    /// Create a client that authenticates with `token`.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            token: token.into(),
            base_url: API_ROOT.to_string(),
        })
    }

    /// Point the client at a different API root (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one page of stargazers for `repo`.
    ///
    /// Pass `None` for the first page; thereafter pass the `next` cursor
    /// from the previous [`StargazerPage`].
    pub fn stargazer_page(&self, repo: &RepoRef, page_url: Option<&str>) -> Result<StargazerPage> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => format!(
                "{}/repos/{}/{}/stargazers?per_page={PER_PAGE}",
                self.base_url,
                repo.owner(),
                repo.name()
            ),
        };

        let response = self.get_with_retry(&url, STAR_MEDIA_TYPE)?;
        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(pagination::next_link);

        let entries: Vec<StarEntry> = response.json()?;
        let records = entries.into_iter().map(StarEntry::into_record).collect();

        Ok(StargazerPage { records, next })
    }

    /// Fetch detailed profile information for a login.
    pub fn user_detail(&self, login: &str) -> Result<ProfileDetail> {
        let url = format!("{}/users/{login}", self.base_url);
        let response = self.get_with_retry(&url, MEDIA_TYPE)?;
        let payload: UserPayload = response.json()?;
        Ok(payload.into_detail())
    }

    /// Perform a GET with bounded retry and exponential backoff.
    ///
    /// Transient failures (rate limits, 5xx, transport errors) are retried
    /// up to `MAX_RETRIES` times; rate limits back off longer. Terminal
    /// failures surface immediately.
    fn get_with_retry(&self, url: &str, accept: &str) -> Result<reqwest::blocking::Response> {
        let mut last_error = None;
        let mut backoff_multiplier = 1;

        for attempt in 0..MAX_RETRIES {
            let result = self
                .http
                .get(url)
                .header(reqwest::header::ACCEPT, accept)
                .header(
                    reqwest::header::AUTHORIZATION,
                    format!("token {}", self.token),
                )
                .send();

            let error = match result {
                Ok(response) => match Self::classify(response) {
                    Ok(response) => return Ok(response),
                    Err(e) => e,
                },
                Err(e) => GithubError::from(e),
            };

            if !error.is_transient() {
                return Err(error);
            }
            if matches!(error, GithubError::RateLimited) {
                backoff_multiplier = RATE_LIMIT_BACKOFF_MULTIPLIER;
            }

            last_error = Some(error);

            if attempt < MAX_RETRIES - 1 {
                let delay = Duration::from_millis(
                    RETRY_DELAY_MS * backoff_multiplier * (u64::from(attempt) + 1),
                );
                tracing::warn!(
                    url,
                    attempt = attempt + 1,
                    max = MAX_RETRIES,
                    "GitHub request failed, retrying in {delay:?}"
                );
                std::thread::sleep(delay);
            }
        }

        Err(last_error.unwrap_or_else(|| GithubError::Network("retries exhausted".to_string())))
    }

    /// Turn a non-success response into a typed error.
    fn classify(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(match status.as_u16() {
            404 => GithubError::NotFound,
            // GitHub signals an exhausted quota as 403 with a zeroed
            // X-RateLimit-Remaining header, or as a plain 429.
            429 => GithubError::RateLimited,
            403 if rate_limit_exhausted(&response) => GithubError::RateLimited,
            code => {
                let message = response
                    .text()
                    .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
                GithubError::Api {
                    status: code,
                    message,
                }
            }
        })
    }
}

/// Whether a 403 response carries an exhausted rate-limit quota.
fn rate_limit_exhausted(response: &reqwest::blocking::Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

impl DetailLookup for GithubClient {
    fn lookup(&self, login: &str) -> std::result::Result<ProfileDetail, DetailError> {
        self.user_detail(login).map_err(DetailError::from)
    }
}

/// Stargazer list entry under the `star+json` media type.
#[derive(Debug, Deserialize)]
struct StarEntry {
    starred_at: Option<DateTime<Utc>>,
    user: StarUser,
}

#[derive(Debug, Deserialize)]
struct StarUser {
    login: String,
    html_url: String,
}

impl StarEntry {
    fn into_record(self) -> StargazerRecord {
        StargazerRecord {
            login: self.user.login,
            profile_url: self.user.html_url,
            joined_at: self.starred_at,
        }
    }
}

/// Detailed user payload from `GET /users/{login}`.
#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    blog: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    twitter_username: Option<String>,
}

impl UserPayload {
    fn into_detail(self) -> ProfileDetail {
        ProfileDetail {
            login: self.login,
            name: none_if_blank(self.name),
            bio: none_if_blank(self.bio),
            blog_url: none_if_blank(self.blog),
            company: none_if_blank(self.company),
            location: none_if_blank(self.location),
            public_email: none_if_blank(self.email),
            twitter: none_if_blank(self.twitter_username),
        }
    }
}

/// GitHub reports unset profile fields as `null` or `""` interchangeably.
fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_entry_deserializes() {
        let json = r#"{
            "starred_at": "2024-03-01T12:00:00Z",
            "user": {"login": "octocat", "html_url": "https://github.com/octocat"}
        }"#;
        let entry: StarEntry = serde_json::from_str(json).unwrap();
        let record = entry.into_record();
        assert_eq!(record.login, "octocat");
        assert_eq!(record.profile_url, "https://github.com/octocat");
        assert!(record.joined_at.is_some());
    }

    #[test]
    fn test_user_payload_blank_fields_become_none() {
        let json = r#"{
            "login": "octocat",
            "name": "The Octocat",
            "bio": null,
            "blog": "",
            "company": "  ",
            "location": "San Francisco",
            "email": null,
            "twitter_username": null
        }"#;
        let payload: UserPayload = serde_json::from_str(json).unwrap();
        let detail = payload.into_detail();
        assert_eq!(detail.name.as_deref(), Some("The Octocat"));
        assert_eq!(detail.bio, None);
        assert_eq!(detail.blog_url, None);
        assert_eq!(detail.company, None);
        assert_eq!(detail.location.as_deref(), Some("San Francisco"));
    }

    #[test]
    fn test_user_payload_tolerates_missing_fields() {
        let json = r#"{"login": "octocat"}"#;
        let payload: UserPayload = serde_json::from_str(json).unwrap();
        let detail = payload.into_detail();
        assert_eq!(detail.login, "octocat");
        assert!(detail.blog_url.is_none());
    }

    #[test]
    fn test_retry_constants() {
        const _: () = assert!(MAX_RETRIES > 0);
        const _: () = assert!(MAX_RETRIES <= 5);
        const _: () = assert!(RETRY_DELAY_MS >= 500);
        const _: () = assert!(RATE_LIMIT_BACKOFF_MULTIPLIER > 1);
    }
}
