// Language share computation.

use crate::github::{GitHubLanguages, LanguageShare};

/// Turn a byte count per language into percentage shares.
///
/// Order follows the input map. Each percentage is rounded half away from
/// zero to one decimal. An empty map (or one totalling zero bytes) yields
/// no shares.
pub fn compute_shares(languages: &GitHubLanguages) -> Vec<LanguageShare> {
    let total = languages.total_bytes();
    if total == 0 {
        return Vec::new();
    }

    languages
        .iter()
        .map(|(name, bytes)| LanguageShare {
            name: name.to_string(),
            percentage: format_percentage(bytes as f64 / total as f64 * 100.0),
        })
        .collect()
}

fn format_percentage(value: f64) -> String {
    // f64::round is half away from zero.
    format!("{:.1}", (value * 10.0).round() / 10.0)
}
