//! A fake GitHub API served by axum on an ephemeral port.
//!
//! Counts every hit so tests can assert how often upstream was consulted.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::Response,
    routing::get,
};
use showcase::Credential;
use showcase::cache::ResponseCache;
use showcase::github::GitHubClient;
use showcase::server::ProjectsEndpoint;

pub const USER: &str = "someone";
pub const TOKEN: &str = "TEST_TOKEN";

/// How the repository listing answers.
#[derive(Debug, Clone)]
pub enum Listing {
    Ok,
    RateLimited { reset: Option<&'static str> },
    Status { status: u16, remaining: &'static str },
    /// 200 with a body that is not a repository array.
    Malformed,
}

#[derive(Debug, Clone)]
pub struct Behavior {
    pub listing: Listing,
    /// Repository whose language lookup fails with 403 and an exhausted rate limit.
    pub failing_languages: Option<&'static str>,
    /// Delay applied to the first repository's language lookup.
    pub first_language_delay: Duration,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            listing: Listing::Ok,
            failing_languages: None,
            first_language_delay: Duration::ZERO,
        }
    }
}

pub struct FakeGitHub {
    pub base_url: String,
    pub behavior: Behavior,
    pub repo_hits: AtomicUsize,
    pub language_hits: AtomicUsize,
}

impl FakeGitHub {
    pub fn repo_hits(&self) -> usize {
        self.repo_hits.load(Ordering::SeqCst)
    }

    pub fn language_hits(&self) -> usize {
        self.language_hits.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(&self.base_url).unwrap()
    }

    /// Endpoint wired to this fake with the given cache TTL.
    pub fn endpoint(&self, ttl: Duration) -> ProjectsEndpoint {
        ProjectsEndpoint::new(
            self.client(),
            ResponseCache::new(ttl),
            USER,
            Credential::new(TOKEN),
            4,
        )
    }
}

pub async fn spawn_fake(behavior: Behavior) -> Arc<FakeGitHub> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let fake = Arc::new(FakeGitHub {
        base_url: format!("http://{}", addr),
        behavior,
        repo_hits: AtomicUsize::new(0),
        language_hits: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/users/{user}/repos", get(list_repos))
        .route("/repos/{owner}/{repo}/languages", get(list_languages))
        .with_state(Arc::clone(&fake));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    fake
}

fn respond(status: u16, headers: &[(&str, &str)], body: String) -> Response {
    let mut builder = Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body)).unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn list_repos(
    State(fake): State<Arc<FakeGitHub>>,
    Path(user): Path<String>,
    headers: HeaderMap,
) -> Response {
    fake.repo_hits.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return respond(StatusCode::UNAUTHORIZED.as_u16(), &[], "{}".to_string());
    }

    match &fake.behavior.listing {
        Listing::Ok => {
            let body = serde_json::json!([
                {
                    "id": 1,
                    "name": "demo",
                    "description": "d",
                    "html_url": format!("https://github.com/{}/demo", user),
                    "languages_url": format!("{}/repos/{}/demo/languages", fake.base_url, user),
                    "pushed_at": "2025-08-01T12:00:00Z",
                    "homepage": "https://demo.example",
                    "fork": false
                },
                {
                    "id": 2,
                    "name": "site",
                    "description": null,
                    "html_url": format!("https://github.com/{}/site", user),
                    "languages_url": format!("{}/repos/{}/site/languages", fake.base_url, user),
                    "pushed_at": "2025-07-01T12:00:00Z",
                    "homepage": null,
                    "fork": true
                },
                {
                    "id": 3,
                    "name": "empty",
                    "description": null,
                    "html_url": format!("https://github.com/{}/empty", user),
                    "languages_url": format!("{}/repos/{}/empty/languages", fake.base_url, user),
                    "pushed_at": null
                }
            ]);
            respond(
                200,
                &[
                    ("x-ratelimit-remaining", "4999"),
                    ("x-ratelimit-limit", "5000"),
                    ("x-ratelimit-reset", "1900000000"),
                ],
                body.to_string(),
            )
        }
        Listing::RateLimited { reset } => {
            let mut headers = vec![("x-ratelimit-remaining", "0"), ("x-ratelimit-limit", "5000")];
            if let Some(reset) = reset {
                headers.push(("x-ratelimit-reset", *reset));
            }
            respond(403, &headers, "rate".to_string())
        }
        Listing::Status { status, remaining } => respond(
            *status,
            &[("x-ratelimit-remaining", *remaining)],
            "upstream failure".to_string(),
        ),
        Listing::Malformed => respond(
            200,
            &[("x-ratelimit-remaining", "4998"), ("x-ratelimit-limit", "5000")],
            r#"{"not": "an array"}"#.to_string(),
        ),
    }
}

async fn list_languages(
    State(fake): State<Arc<FakeGitHub>>,
    Path((_owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    fake.language_hits.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return respond(401, &[], "{}".to_string());
    }

    if fake.behavior.failing_languages == Some(repo.as_str()) {
        return respond(
            403,
            &[("x-ratelimit-remaining", "0")],
            "languages unavailable".to_string(),
        );
    }

    let body = match repo.as_str() {
        "demo" => {
            tokio::time::sleep(fake.behavior.first_language_delay).await;
            r#"{"TypeScript": 300, "Astro": 100, "CSS": 100}"#
        }
        "site" => r#"{"Rust": 2, "Shell": 1}"#,
        _ => "{}",
    };

    respond(200, &[], body.to_string())
}
