// GitHub API module.
// Provides the client and types for the repository and language endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::RepositoryList;
pub use types::*;
