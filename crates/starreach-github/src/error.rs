//! GitHub client errors and their mapping onto the core taxonomy.

use starreach_core::{DetailError, SourceError};
use thiserror::Error;

/// Result type alias using [`GithubError`].
pub type Result<T> = std::result::Result<T, GithubError>;

/// Failure of a single GitHub API request after retries are exhausted.
#[derive(Error, Debug)]
pub enum GithubError {
    /// Rate limit hit (HTTP 403 with an exhausted quota, or 429).
    #[error("rate limited by the GitHub API")]
    RateLimited,

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// Transport-level failure (DNS, TLS, connect, read).
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success response.
    #[error("GitHub API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
}

impl GithubError {
    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::NotFound => false,
        }
    }
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<GithubError> for DetailError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::RateLimited => Self::RateLimited,
            GithubError::NotFound => Self::NotFound,
            GithubError::Network(msg) => Self::Network(msg),
            GithubError::Api { status, message } => {
                Self::Network(format!("API error (status {status}): {message}"))
            }
        }
    }
}

impl From<GithubError> for SourceError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::RateLimited => Self::RateLimited,
            GithubError::Network(msg) => Self::Network(msg),
            GithubError::NotFound => Self::Api {
                status: 404,
                message: "repository not found".to_string(),
            },
            GithubError::Api { status, message } => Self::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GithubError::RateLimited.is_transient());
        assert!(GithubError::Network("reset".to_string()).is_transient());
        assert!(GithubError::Api {
            status: 502,
            message: "bad gateway".to_string()
        }
        .is_transient());
        assert!(!GithubError::NotFound.is_transient());
        assert!(!GithubError::Api {
            status: 422,
            message: "unprocessable".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_detail_error_mapping() {
        assert_eq!(
            DetailError::from(GithubError::RateLimited),
            DetailError::RateLimited
        );
        assert_eq!(
            DetailError::from(GithubError::NotFound),
            DetailError::NotFound
        );
        assert!(matches!(
            DetailError::from(GithubError::Network("x".to_string())),
            DetailError::Network(_)
        ));
    }

    #[test]
    fn test_source_error_mapping() {
        assert!(matches!(
            SourceError::from(GithubError::RateLimited),
            SourceError::RateLimited
        ));
        assert!(matches!(
            SourceError::from(GithubError::NotFound),
            SourceError::Api { status: 404, .. }
        ));
    }
}
