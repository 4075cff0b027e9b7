// Cache module for the assembled project payload.
// Keeps one in-memory entry per process, served until its TTL lapses.

pub mod store;

pub use store::{CacheEntry, DEFAULT_TTL, ResponseCache, build_fingerprint, is_fresh};
