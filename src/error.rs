// Error types for the showcase service.
// Covers credential problems, upstream GitHub failures and local I/O.

use reqwest::StatusCode;
use thiserror::Error;

use crate::github::RateLimitSnapshot;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("GitHub token not configured")]
    MissingCredential,

    #[error("GitHub token is required")]
    CredentialRequired,

    #[error("GitHub API rate limit exceeded")]
    RateLimited { rate_limit: RateLimitSnapshot },

    #[error("GitHub returned HTTP {}", .status.as_u16())]
    Upstream {
        status: StatusCode,
        rate_limit: RateLimitSnapshot,
    },

    #[error("Failed to fetch languages from {url}: HTTP {}", .status.as_u16())]
    Languages { url: String, status: StatusCode },

    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ShowcaseError {
    /// Stable discriminator used in JSON error bodies.
    pub fn code(&self) -> String {
        match self {
            ShowcaseError::RateLimited { .. } => "RATE_LIMIT".to_string(),
            ShowcaseError::Upstream { status, .. } => format!("HTTP_{}", status.as_u16()),
            ShowcaseError::MissingCredential | ShowcaseError::CredentialRequired => {
                "MISSING_CREDENTIAL".to_string()
            }
            _ => "INTERNAL_ERROR".to_string(),
        }
    }

    /// Rate limit headers captured alongside the failure, if any.
    pub fn rate_limit(&self) -> Option<&RateLimitSnapshot> {
        match self {
            ShowcaseError::RateLimited { rate_limit }
            | ShowcaseError::Upstream { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
