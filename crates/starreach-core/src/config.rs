//! Pipeline configuration.
//!
//! All knobs the orchestrator honors: the user cap, the two pool sizes, the
//! deadline ceilings, and the output path. Values come from CLI flags; the
//! API token is injected separately into the client that needs it and is
//! deliberately not part of this struct so it can never be serialized or
//! logged alongside it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default concurrency cap for detail lookups.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 5;

/// Default concurrency cap for website scrapes.
pub const DEFAULT_SCRAPE_CONCURRENCY: usize = 5;

/// Default deadline for acquiring a browser session and loading the page.
/// Session creation can hang indefinitely when the browser process wedges,
/// so this ceiling is mandatory, not best-effort.
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 20_000;

/// Default deadline for a single page navigation inside a live session.
pub const DEFAULT_PAGE_TIMEOUT_MS: u64 = 10_000;

/// Default output spreadsheet filename.
pub const DEFAULT_OUTPUT: &str = "stargazers.xlsx";

/// Tunable settings for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound on users processed; `None` processes every stargazer.
    pub limit: Option<usize>,
    /// Concurrency cap for detail lookups (`Cd`).
    pub detail_concurrency: usize,
    /// Concurrency cap for scrapes (`Cs`).
    pub scrape_concurrency: usize,
    /// Deadline in milliseconds for session creation plus page load.
    pub session_timeout_ms: u64,
    /// Deadline in milliseconds for page navigation inside a session.
    pub page_timeout_ms: u64,
    /// Where the spreadsheet is written.
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limit: None,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            scrape_concurrency: DEFAULT_SCRAPE_CONCURRENCY,
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            page_timeout_ms: DEFAULT_PAGE_TIMEOUT_MS,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl PipelineConfig {
    /// Validate that every knob is usable.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for zero pool caps or zero
    /// deadlines, either of which would deadlock or never dispatch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detail_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "detail_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.scrape_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scrape_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session_timeout_ms".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.page_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_timeout_ms".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if let Some(0) = self.limit {
            return Err(ConfigError::InvalidValue {
                field: "limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Session-creation deadline as a [`Duration`].
    #[must_use]
    pub fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }

    /// Page-navigation deadline as a [`Duration`].
    #[must_use]
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detail_concurrency, DEFAULT_DETAIL_CONCURRENCY);
        assert_eq!(config.output_path, PathBuf::from("stargazers.xlsx"));
    }

    #[test]
    fn test_zero_caps_rejected() {
        let config = PipelineConfig {
            detail_concurrency: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            scrape_concurrency: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = PipelineConfig {
            session_timeout_ms: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = PipelineConfig {
            limit: Some(0),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_conversion() {
        let config = PipelineConfig {
            session_timeout_ms: 1500,
            ..PipelineConfig::default()
        };
        assert_eq!(config.session_timeout(), Duration::from_millis(1500));
    }
}
