// GitHub API endpoint functions.
// The two calls the service needs: list a user's repositories, list a repository's languages.

use reqwest::StatusCode;

use crate::error::{Result, ShowcaseError};

use super::client::GitHubClient;
use super::types::{GitHubLanguages, RateLimitSnapshot, Repository};

/// A successful repository listing plus the rate limit state it reported.
#[derive(Debug, Clone)]
pub struct RepositoryList {
    pub repositories: Vec<Repository>,
    pub rate_limit: RateLimitSnapshot,
}

impl GitHubClient {
    /// Get public repositories for a user, most recently updated first.
    ///
    /// A 403 with `x-ratelimit-remaining: 0` becomes [`ShowcaseError::RateLimited`];
    /// any other non-2xx becomes [`ShowcaseError::Upstream`]. Nothing is retried.
    pub async fn fetch_repositories(&self, user: &str, credential: &str) -> Result<RepositoryList> {
        if credential.trim().is_empty() {
            return Err(ShowcaseError::MissingCredential);
        }

        let url = self.endpoint_url(&format!("/users/{}/repos", user));
        let params = [("sort", "updated"), ("direction", "desc")];
        let (response, rate_limit) = self.get(&url, credential, &params).await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN && rate_limit.is_exhausted() {
            tracing::warn!(reset = ?rate_limit.reset, "GitHub rate limit exhausted");
            return Err(ShowcaseError::RateLimited { rate_limit });
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), user, "repository listing failed");
            return Err(ShowcaseError::Upstream { status, rate_limit });
        }

        let repositories: Vec<Repository> = response.json().await?;
        Ok(RepositoryList {
            repositories,
            rate_limit,
        })
    }

    /// Get the byte count per language from a repository's `languages_url`.
    ///
    /// Failures are reported as [`ShowcaseError::Languages`] whatever the status,
    /// rate limited or not.
    pub async fn fetch_languages(&self, url: &str, credential: &str) -> Result<GitHubLanguages> {
        if credential.trim().is_empty() {
            return Err(ShowcaseError::MissingCredential);
        }

        let (response, _) = self.get(url, credential, &[]).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShowcaseError::Languages {
                url: url.to_string(),
                status,
            });
        }

        let languages: GitHubLanguages = response.json().await?;
        Ok(languages)
    }
}
