// showcase: GitHub project data for a portfolio site.
// Lists a user's repositories, attaches language shares, and serves the result
// from a single in-memory cache with conditional-request support.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod projects;
pub mod server;

pub use config::{Config, Credential};
pub use error::{Result, ShowcaseError};
