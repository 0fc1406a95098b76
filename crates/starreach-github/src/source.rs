//! Async adapter exposing the blocking client as a [`StargazerSource`].

use crate::client::GithubClient;
use async_trait::async_trait;
use starreach_core::{RepoRef, SourceError, StargazerRecord, StargazerSource};

/// Pagination position.
#[derive(Debug, Clone)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazy, finite stargazer source for one repository.
///
/// Each `next_page` call performs exactly one blocking page fetch, run on a
/// worker thread so the scheduler never blocks on list I/O.
pub struct GithubStargazerSource {
    client: GithubClient,
    repo: RepoRef,
    cursor: Cursor,
}

impl GithubStargazerSource {
    /// Create a source positioned at the first page.
    #[must_use]
    pub fn new(client: GithubClient, repo: RepoRef) -> Self {
        Self {
            client,
            repo,
            cursor: Cursor::Start,
        }
    }
}

#[async_trait]
impl StargazerSource for GithubStargazerSource {
    async fn next_page(&mut self) -> Result<Vec<StargazerRecord>, SourceError> {
        let page_url = match &self.cursor {
            Cursor::Start => None,
            Cursor::Next(url) => Some(url.clone()),
            Cursor::Done => return Ok(Vec::new()),
        };

        let client = self.client.clone();
        let repo = self.repo.clone();
        let page = tokio::task::spawn_blocking(move || {
            client.stargazer_page(&repo, page_url.as_deref())
        })
        .await
        .map_err(|e| SourceError::Network(format!("list worker failed: {e}")))?
        .map_err(SourceError::from)?;

        self.cursor = match page.next {
            Some(url) if !page.records.is_empty() => Cursor::Next(url),
            _ => Cursor::Done,
        };

        tracing::debug!(
            repo = %self.repo,
            fetched = page.records.len(),
            has_next = matches!(self.cursor, Cursor::Next(_)),
            "fetched stargazer page"
        );

        Ok(page.records)
    }
}
