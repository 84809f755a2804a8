//! Repository snapshots and cursor pagination.
//!
//! This module defines the local shape GitHub repository data is mapped
//! into: [`RepoSnapshot`] for a single repository's descriptive fields, and
//! [`PageInfo`]/[`RepoPage`] for the cursor pagination envelope both GitHub
//! read operations return.
//!
//! A snapshot copies the repository's descriptive fields at the time it is
//! taken. A favorited snapshot can therefore drift from the repository's
//! live GitHub state until it is re-favorited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time copy of a GitHub repository's descriptive fields.
///
/// Field names on the wire keep GitHub's snake_case REST naming
/// (`html_url`, `stargazers_count`, `forks_count`), which is the shape the
/// original API consumers expect.
///
/// # Examples
///
/// ```
/// use repodo_protocol::RepoSnapshot;
///
/// let repo = RepoSnapshot {
///     id: "R_1".to_string(),
///     name: "tokio".to_string(),
///     description: Some("An async runtime".to_string()),
///     url: "https://github.com/tokio-rs/tokio".to_string(),
///     language: Some("Rust".to_string()),
///     stars: 25_000,
///     forks: 2_300,
///     updated_at: chrono::Utc::now(),
/// };
/// assert_eq!(repo.name, "tokio");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// GitHub's opaque node identifier.
    pub id: String,
    /// Repository name (without the owner prefix).
    pub name: String,
    /// Repository description, if any.
    pub description: Option<String>,
    /// Web URL of the repository.
    #[serde(rename = "html_url")]
    pub url: String,
    /// Primary language, if GitHub reports one.
    pub language: Option<String>,
    /// Star count at snapshot time.
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    /// Fork count at snapshot time.
    #[serde(rename = "forks_count")]
    pub forks: u64,
    /// When the repository was last updated, at snapshot time.
    pub updated_at: DateTime<Utc>,
}

/// Cursor positions for a page of results.
///
/// Cursors are opaque tokens; callers pass `end_cursor` back as the
/// `cursor` parameter to fetch the following page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Whether a page precedes this one.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    /// Cursor of the last item in this page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One page of repositories plus its pagination envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoPage {
    /// The repositories in this page.
    pub repositories: Vec<RepoSnapshot>,
    /// Cursor positions for this page.
    pub page_info: PageInfo,
    /// Total number of repositories matching the request, across all pages.
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_repo() -> RepoSnapshot {
        RepoSnapshot {
            id: "R_kgDOABC123".to_string(),
            name: "repodo".to_string(),
            description: None,
            url: "https://github.com/example/repodo".to_string(),
            language: Some("Rust".to_string()),
            stars: 12,
            forks: 3,
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn snapshot_wire_format_matches_github_naming() {
        let json = serde_json::to_value(sample_repo()).expect("serialize");

        assert_eq!(json["html_url"], "https://github.com/example/repodo");
        assert_eq!(json["stargazers_count"], 12);
        assert_eq!(json["forks_count"], 3);
        assert!(json.get("url").is_none());
        assert!(json.get("stars").is_none());
    }

    #[test]
    fn snapshot_roundtrip() {
        let repo = sample_repo();
        let json = serde_json::to_string(&repo).expect("serialize");
        let parsed: RepoSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(repo, parsed);
    }

    #[test]
    fn page_wire_format_uses_camel_case() {
        let page = RepoPage {
            repositories: vec![sample_repo()],
            page_info: PageInfo {
                has_next_page: true,
                has_previous_page: false,
                start_cursor: Some("a".to_string()),
                end_cursor: Some("b".to_string()),
            },
            total_count: 42,
        };
        let json = serde_json::to_value(&page).expect("serialize");

        assert_eq!(json["totalCount"], 42);
        assert_eq!(json["pageInfo"]["hasNextPage"], true);
        assert_eq!(json["pageInfo"]["endCursor"], "b");
    }

    #[test]
    fn page_info_cursors_omitted_when_absent() {
        let json = serde_json::to_value(PageInfo::default()).expect("serialize");
        assert!(json.get("startCursor").is_none());
        assert!(json.get("endCursor").is_none());
    }
}
