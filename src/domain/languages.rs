//! CodeQL language coverage gate.

use std::collections::BTreeMap;

/// Languages the scanning engine can analyze, as they appear in the
/// language-breakdown endpoint's keys.
pub const SUPPORTED_LANGUAGES: [&str; 10] =
    ["Go", "Swift", "Csharp", "Cpp", "C", "Java", "JavaScript", "Python", "Kotlin", "Ruby"];

/// Intersect a repository's language breakdown with the supported set.
///
/// An empty result means the repository is skipped, not an error.
pub fn supported_languages(breakdown: &BTreeMap<String, u64>) -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .filter(|language| breakdown.contains_key(**language))
        .map(|language| language.to_string())
        .collect()
}
