use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;

/// Browser automation engine.
///
/// One Chromium process shared across all scrape tasks; each task gets its
/// own page. The engine itself never applies deadlines to session creation
/// (the orchestrator bounds how long it waits for the whole scrape task),
/// but it does bound page navigation so a dead site cannot pin a session
/// forever.
pub struct BrowserEngine {
    browser: Browser,
    fingerprint: FingerprintConfig,
}

impl BrowserEngine {
    /// Launch a headless browser with a randomized fingerprint.
    pub async fn new() -> Result<Self> {
        Self::with_fingerprint(FingerprintConfig::randomized()).await
    }

    /// Launch a headless browser with a specific fingerprint.
    pub async fn with_fingerprint(fingerprint: FingerprintConfig) -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .build()
            .map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive the CDP connection until the browser goes away.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            fingerprint,
        })
    }

    /// Open `url` in a fresh page and return the rendered content.
    ///
    /// The page is exclusively owned by this call and closed on every exit
    /// path, including navigation timeout and error. Callers that stop
    /// waiting must let this future run to completion (on its own task)
    /// rather than drop it, or the close is skipped and the tab leaks.
    pub async fn fetch_rendered(&self, url: &str, nav_timeout: Duration) -> Result<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?;

        let result = self.load_content(&page, url, nav_timeout).await;

        if let Err(e) = page.close().await {
            tracing::debug!(url, "failed to close page: {e}");
        }

        result
    }

    async fn load_content(&self, page: &Page, url: &str, nav_timeout: Duration) -> Result<String> {
        page.set_user_agent(self.fingerprint.user_agent.as_str())
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?;

        let load = async {
            page.goto(url)
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            page.content()
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))
        };

        tokio::time::timeout(nav_timeout, load)
            .await
            .map_err(|_| BrowserError::Timeout(format!("page load exceeded {nav_timeout:?}")))?
    }
}
