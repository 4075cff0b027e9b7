// GitHub API HTTP client.
// Handles authentication, rate limit header capture, and request/response processing.

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, ShowcaseError};

use super::types::RateLimitSnapshot;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client. The bearer credential is supplied per call.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client against the given API base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("showcase/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ShowcaseError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path such as `/users/octocat/repos`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make an authenticated GET request. Any status is returned to the caller
    /// together with the rate limit headers; status decoding is per endpoint.
    pub async fn get(
        &self,
        url: &str,
        credential: &str,
        params: &[(&str, &str)],
    ) -> Result<(Response, RateLimitSnapshot)> {
        let response = self
            .client
            .get(url)
            .bearer_auth(credential)
            .query(params)
            .send()
            .await
            .map_err(ShowcaseError::Api)?;

        let rate_limit = rate_limit_from_headers(response.headers());
        Ok((response, rate_limit))
    }
}

/// Copy the `x-ratelimit-*` headers, keeping their raw string form.
pub fn rate_limit_from_headers(headers: &HeaderMap) -> RateLimitSnapshot {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    RateLimitSnapshot {
        remaining: header("x-ratelimit-remaining"),
        limit: header("x-ratelimit-limit"),
        reset: header("x-ratelimit-reset"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("5000"));

        let snapshot = rate_limit_from_headers(&headers);
        assert_eq!(snapshot.remaining.as_deref(), Some("4999"));
        assert_eq!(snapshot.limit.as_deref(), Some("5000"));
        assert!(snapshot.reset.is_none());
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let client = GitHubClient::new("http://127.0.0.1:9999/").unwrap();
        assert_eq!(
            client.endpoint_url("/users/someone/repos"),
            "http://127.0.0.1:9999/users/someone/repos"
        );
    }
}
