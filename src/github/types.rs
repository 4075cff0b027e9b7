// GitHub API response types.
// Defines structs for deserializing the repository listing and language breakdowns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// GitHub repository, as returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub languages_url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub fork: bool,
}

/// Byte count per language for one repository.
///
/// Entries keep the order GitHub sent them in, which is what the
/// share computation preserves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitHubLanguages(Vec<(String, u64)>);

impl GitHubLanguages {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, bytes)| (name.as_str(), *bytes))
    }

    pub fn total_bytes(&self) -> u64 {
        self.0.iter().map(|(_, bytes)| bytes).sum()
    }
}

impl<const N: usize> From<[(&str, u64); N]> for GitHubLanguages {
    fn from(entries: [(&str, u64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, bytes)| (name.to_string(), bytes))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for GitHubLanguages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguagesVisitor;

        impl<'de> Visitor<'de> for LanguagesVisitor {
            type Value = GitHubLanguages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language name to byte count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, bytes)) = map.next_entry::<String, u64>()? {
                    entries.push((name, bytes));
                }
                Ok(GitHubLanguages(entries))
            }
        }

        deserializer.deserialize_map(LanguagesVisitor)
    }
}

/// Percentage of a repository's bytes attributed to one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    /// One fractional digit, e.g. `"60.0"`.
    pub percentage: String,
}

/// A repository enriched with its language shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(flatten)]
    pub repository: Repository,
    pub languages: Vec<LanguageShare>,
}

/// Rate limit headers mirrored verbatim from an upstream response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: Option<String>,
    pub limit: Option<String>,
    pub reset: Option<String>,
}

impl RateLimitSnapshot {
    /// True when GitHub reports no requests left in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.as_deref() == Some("0")
    }

    /// Reset time parsed from the epoch-seconds header. Zero or garbage yields `None`.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.reset.as_deref()?.trim().parse().ok()?;
        if secs == 0 {
            return None;
        }
        DateTime::from_timestamp(secs, 0)
    }
}
