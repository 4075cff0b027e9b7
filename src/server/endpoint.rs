// Project-data endpoint.
// Decides cache hit or refetch per request and turns outcomes into HTTP responses.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::cache::{CacheEntry, ResponseCache};
use crate::config::{Config, Credential};
use crate::error::{Result, ShowcaseError};
use crate::github::{GitHubClient, RateLimitSnapshot, RepositoryList};
use crate::projects::assemble;

use super::response::{ApiResponse, CacheStatus};

/// Owns everything one deployment needs to answer `GET /api/github`.
pub struct ProjectsEndpoint {
    client: GitHubClient,
    cache: ResponseCache,
    /// Held for the duration of a refetch so concurrent misses share one.
    refresh: Mutex<()>,
    user: String,
    credential: Option<Credential>,
    language_concurrency: usize,
}

impl ProjectsEndpoint {
    pub fn new(
        client: GitHubClient,
        cache: ResponseCache,
        user: impl Into<String>,
        credential: Option<Credential>,
        language_concurrency: usize,
    ) -> Self {
        Self {
            client,
            cache,
            refresh: Mutex::new(()),
            user: user.into(),
            credential,
            language_concurrency,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GitHubClient::new(&config.api_base)?;
        Ok(Self::new(
            client,
            ResponseCache::new(config.cache_ttl()),
            config.github_user.clone(),
            config.credential(),
            usize::from(config.language_concurrency),
        ))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Answer one request, given the client's `If-None-Match` header.
    pub async fn respond(&self, if_none_match: Option<&str>) -> ApiResponse {
        let Some(credential) = &self.credential else {
            tracing::warn!("request rejected: no GitHub token configured");
            return ApiResponse::unauthorized();
        };

        if let Some(entry) = self.cache.fresh(Utc::now()) {
            tracing::debug!(etag = %entry.fingerprint, "serving cached projects");
            return ApiResponse::conditional(&entry, CacheStatus::Hit, if_none_match);
        }

        let _refresh = self.refresh.lock().await;

        // Another request may have refreshed the slot while this one waited.
        if let Some(entry) = self.cache.fresh(Utc::now()) {
            tracing::debug!(etag = %entry.fingerprint, "serving projects refreshed by a concurrent request");
            return ApiResponse::conditional(&entry, CacheStatus::Hit, if_none_match);
        }

        let listing = match self
            .client
            .fetch_repositories(&self.user, credential.expose())
            .await
        {
            Ok(listing) => listing,
            Err(e) => return failure(e, None),
        };

        let rate_limit = listing.rate_limit.clone();
        match self.refresh_entry(listing, credential).await {
            Ok(entry) => {
                tracing::info!(
                    etag = %entry.fingerprint,
                    remaining = ?rate_limit.remaining,
                    "refreshed projects from GitHub"
                );
                ApiResponse::conditional(&entry, CacheStatus::Miss, if_none_match)
            }
            Err(e) => failure(e, Some(&rate_limit)),
        }
    }

    /// Assemble project records for a listing and replace the cache slot.
    async fn refresh_entry(
        &self,
        listing: RepositoryList,
        credential: &Credential,
    ) -> Result<Arc<CacheEntry>> {
        let now = Utc::now();
        let RepositoryList {
            repositories,
            rate_limit,
        } = listing;

        let projects = assemble(
            &self.client,
            repositories,
            credential.expose(),
            self.language_concurrency,
        )
        .await?;

        let payload = serde_json::to_string(&projects)?;
        Ok(self
            .cache
            .store(CacheEntry::new(payload, Some(rate_limit), now)))
    }
}

/// Log a refetch failure and map it to its response. Only listing errors
/// carry their own status; everything else, language lookups included, is a 500.
fn failure(error: ShowcaseError, known: Option<&RateLimitSnapshot>) -> ApiResponse {
    match &error {
        ShowcaseError::RateLimited { rate_limit } => {
            tracing::warn!(reset = ?rate_limit.reset, "GitHub rate limit hit");
        }
        ShowcaseError::Upstream { status, .. } => {
            tracing::warn!(status = status.as_u16(), "GitHub repository listing failed");
        }
        ShowcaseError::MissingCredential | ShowcaseError::CredentialRequired => {}
        _ => tracing::error!(error = %error, "failed to refresh projects"),
    }

    ApiResponse::from_error(&error, known)
}
