// HTTP response values for the project-data endpoint.
// Built without a socket so the request state machine can be tested directly.

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::cache::CacheEntry;
use crate::error::ShowcaseError;
use crate::github::RateLimitSnapshot;

pub const PUBLIC_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";
pub const NO_STORE: &str = "no-store";

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Whether a payload came out of the cache or was just assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// JSON body for every error status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reset_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `None` for 304.
    pub body: Option<String>,
}

impl ApiResponse {
    fn new(status: StatusCode, body: Option<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Header value as a string, if present and ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    fn with_rate_limit(self, rate_limit: Option<&RateLimitSnapshot>) -> Self {
        match rate_limit.and_then(|r| r.remaining.as_deref()) {
            Some(remaining) if !remaining.is_empty() => {
                self.with_header(X_RATELIMIT_REMAINING, remaining)
            }
            _ => self,
        }
    }

    fn json_error(status: StatusCode, body: ErrorBody) -> Self {
        let body = serde_json::to_string(&body).unwrap_or_default();
        Self::new(status, Some(body))
            .with_header(CONTENT_TYPE, "application/json")
            .with_header(CACHE_CONTROL, NO_STORE)
    }

    /// 200 with the cached payload.
    pub fn payload(entry: &CacheEntry, cache: CacheStatus) -> Self {
        Self::new(StatusCode::OK, Some(entry.payload.clone()))
            .with_header(CONTENT_TYPE, "application/json")
            .with_header(CACHE_CONTROL, PUBLIC_CACHE_CONTROL)
            .with_header(ETAG, &entry.fingerprint)
            .with_header(X_CACHE, cache.as_str())
            .with_rate_limit(entry.rate_limit.as_ref())
    }

    /// 304 for a client already holding `entry`.
    pub fn not_modified(entry: &CacheEntry, cache: CacheStatus) -> Self {
        Self::new(StatusCode::NOT_MODIFIED, None)
            .with_header(CACHE_CONTROL, PUBLIC_CACHE_CONTROL)
            .with_header(ETAG, &entry.fingerprint)
            .with_header(X_CACHE, cache.as_str())
            .with_rate_limit(entry.rate_limit.as_ref())
    }

    /// 200 or 304 depending on the client's `If-None-Match`.
    pub fn conditional(entry: &CacheEntry, cache: CacheStatus, if_none_match: Option<&str>) -> Self {
        match if_none_match {
            Some(tag) if tag.trim() == entry.fingerprint => Self::not_modified(entry, cache),
            _ => Self::payload(entry, cache),
        }
    }

    /// 401 when no token is configured.
    pub fn unauthorized() -> Self {
        Self::json_error(
            StatusCode::UNAUTHORIZED,
            ErrorBody {
                error: None,
                message: ShowcaseError::MissingCredential.to_string(),
                reset_at: None,
                suggestion: None,
            },
        )
    }

    /// Error response for a failed refetch, discriminated by [`ShowcaseError::code`].
    ///
    /// A rate-limited listing is a 429 carrying the reset time when GitHub
    /// reported one, any other listing status is a 502, and everything else is
    /// a 500 whose details stay in the server log.
    pub fn from_error(error: &ShowcaseError, known: Option<&RateLimitSnapshot>) -> Self {
        let (status, message, reset_at, suggestion) = match error {
            ShowcaseError::MissingCredential | ShowcaseError::CredentialRequired => {
                return Self::unauthorized();
            }
            ShowcaseError::RateLimited { rate_limit } => (
                StatusCode::TOO_MANY_REQUESTS,
                "GitHub API rate limit exceeded",
                rate_limit
                    .reset_at()
                    .map(|at| at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
                Some("Try again after reset or reduce request frequency."),
            ),
            ShowcaseError::Upstream { .. } => (
                StatusCode::BAD_GATEWAY,
                "Failed to retrieve repositories from GitHub",
                None,
                None,
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch GitHub data",
                None,
                None,
            ),
        };

        Self::json_error(
            status,
            ErrorBody {
                error: Some(error.code()),
                message: message.to_string(),
                reset_at,
                suggestion: suggestion.map(str::to_string),
            },
        )
        .with_rate_limit(error.rate_limit().or(known))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            Some(body) => Body::from(body),
            None => Body::empty(),
        };
        (self.status, self.headers, body).into_response()
    }
}
