// Process configuration.
// Parsed once at startup from flags or environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::github::client::GITHUB_API_BASE;

/// Opaque bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, treating blank input as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Parser, Clone)]
#[command(name = "showcase")]
#[command(about = "Serves GitHub repositories with language breakdowns for a portfolio site")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "SHOWCASE_BIND", default_value = "127.0.0.1:4321")]
    pub bind: SocketAddr,

    /// GitHub user whose repositories are served.
    #[arg(long, env = "GITHUB_USERNAME")]
    pub github_user: String,

    /// GitHub token. Requests answer 401 while this is unset.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL.
    #[arg(long, env = "GITHUB_API_BASE", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Seconds an assembled payload is served before refetching.
    #[arg(long, default_value = "3600")]
    pub cache_ttl_secs: u64,

    /// Maximum concurrent language lookups per refetch.
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u16).range(1..))]
    pub language_concurrency: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("github_user", &self.github_user)
            .field("github_token", &self.credential())
            .field("api_base", &self.api_base)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("language_concurrency", &self.language_concurrency)
            .finish()
    }
}

impl Config {
    pub fn credential(&self) -> Option<Credential> {
        self.github_token.clone().and_then(Credential::new)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
