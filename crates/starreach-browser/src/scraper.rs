//! Contact extraction from rendered pages.

use crate::engine::BrowserEngine;
use async_trait::async_trait;
use regex::Regex;
use starreach_core::{ScrapeError, ScrapeResult, WebsiteScraper};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
    })
}

fn linkedin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"linkedin\.com/in/[a-zA-Z0-9-]+").expect("valid regex"))
}

/// Scrapes a personal website for an email address and a LinkedIn URL.
pub struct ProfileScraper {
    engine: Arc<BrowserEngine>,
    nav_timeout: Duration,
}

impl ProfileScraper {
    /// Create a scraper over a shared browser engine.
    #[must_use]
    pub fn new(engine: Arc<BrowserEngine>, nav_timeout: Duration) -> Self {
        Self {
            engine,
            nav_timeout,
        }
    }

    /// Profile sites are often listed without a scheme ("example.com").
    #[must_use]
    pub fn normalize_url(url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{url}")
        }
    }

    /// Pull the first email and LinkedIn match out of page content.
    #[must_use]
    pub fn extract(content: &str, source_url: &str) -> ScrapeResult {
        let email = email_regex()
            .find(content)
            .map(|m| m.as_str().to_string());
        let linkedin = linkedin_regex()
            .find(content)
            .map(|m| format!("https://www.{}", m.as_str()));

        ScrapeResult::completed(source_url.to_string(), email, linkedin)
    }
}

#[async_trait]
impl WebsiteScraper for ProfileScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let target = Self::normalize_url(url);
        tracing::debug!(url = %target, "scraping website");

        let content = self
            .engine
            .fetch_rendered(&target, self.nav_timeout)
            .await
            .map_err(ScrapeError::from)?;

        Ok(Self::extract(&content, &target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starreach_core::ScrapeStatus;

    #[test]
    fn test_extract_email() {
        let html = r#"<html><body>Contact me at jane.doe+work@example.co.uk today</body></html>"#;
        let result = ProfileScraper::extract(html, "http://example.com");
        assert_eq!(result.email.as_deref(), Some("jane.doe+work@example.co.uk"));
        assert_eq!(result.status, ScrapeStatus::Ok);
    }

    #[test]
    fn test_extract_linkedin_normalized() {
        let html = r#"<a href="https://linkedin.com/in/jane-doe-1234">LinkedIn</a>"#;
        let result = ProfileScraper::extract(html, "http://example.com");
        assert_eq!(
            result.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/in/jane-doe-1234")
        );
    }

    #[test]
    fn test_extract_both_takes_first_match() {
        let html = "a@x.io then b@y.io and linkedin.com/in/first plus linkedin.com/in/second";
        let result = ProfileScraper::extract(html, "http://example.com");
        assert_eq!(result.email.as_deref(), Some("a@x.io"));
        assert_eq!(
            result.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/in/first")
        );
        assert_eq!(result.status, ScrapeStatus::Ok);
    }

    #[test]
    fn test_extract_nothing_is_no_data() {
        let html = "<html><body>Just a blog about ferrets</body></html>";
        let result = ProfileScraper::extract(html, "http://example.com");
        assert!(result.email.is_none());
        assert!(result.linkedin_url.is_none());
        assert_eq!(result.status, ScrapeStatus::NoData);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            ProfileScraper::normalize_url("example.com"),
            "http://example.com"
        );
        assert_eq!(
            ProfileScraper::normalize_url("https://example.com"),
            "https://example.com"
        );
        assert_eq!(
            ProfileScraper::normalize_url("http://example.com"),
            "http://example.com"
        );
    }
}
