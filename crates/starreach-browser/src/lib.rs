//! Browser-backed website scraping.
//!
//! Drives headless Chromium to render a user's personal site and pull an
//! email address and/or LinkedIn URL out of the page content. Sessions are
//! slow and hang-prone; every page is owned by exactly one scrape and is
//! closed on every exit path.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod scraper;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use scraper::ProfileScraper;
