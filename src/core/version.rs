//! Package version derivation
//!
//! Tagged release commits get a clean version; intermediate commits get
//! the commit distance appended as a numeric suffix with no separator.

use serde::{Deserialize, Serialize};

/// Version metadata reported by the source-control metadata provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Base semantic version, e.g. "0.3.0-beta"
    pub sem_ver: String,

    /// Four-part assembly version, e.g. "0.3.0.0"
    pub assembly_version: String,

    /// Four-part file version
    pub file_version: String,

    /// Informational version string
    pub informational_version: String,

    /// Commits since the version source (tag), kept as the raw string the
    /// provider reported; parsing happens in [`derive_version`]
    pub commits_since_version_source: String,
}

impl VersionMetadata {
    /// The final publishable package version for this metadata
    pub fn package_version(&self) -> String {
        derive_version(&self.sem_ver, &self.commits_since_version_source)
    }
}

/// Combine a base semantic version with a commit-distance count.
///
/// A count of 0 means a release point and the base version is returned
/// unchanged; a positive count is appended directly, so "1.2.3-beta" with
/// 2 commits becomes "1.2.3-beta2". Malformed or missing metadata is never
/// fatal and degrades to release-point behavior.
pub fn derive_version(base: &str, commits_since_source: &str) -> String {
    match parse_commit_count(commits_since_source) {
        0 => base.to_string(),
        n => format!("{base}{n}"),
    }
}

/// Strict all-or-nothing parse of a commit count; anything that is not a
/// canonical non-negative decimal (empty, non-digits, leading zeros,
/// overflow) is treated as 0.
fn parse_commit_count(raw: &str) -> u64 {
    if raw.is_empty() || (raw.len() > 1 && raw.starts_with('0')) {
        return 0;
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}
