//! GraphQL documents and response mapping.
//!
//! The two query documents select the same repository fields: id, name,
//! description, url, star and fork counts, last-updated time, and primary
//! language. Responses are deserialized into the wire shapes here and then
//! mapped into [`RepoSnapshot`]/[`RepoPage`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use repodo_protocol::{PageInfo, RepoPage, RepoSnapshot};

use crate::error::{Error, Result};

/// Query for the authenticated viewer's repositories, most recently
/// updated first.
pub const VIEWER_REPOSITORIES_QUERY: &str = r"
query ($first: Int!, $after: String) {
  viewer {
    repositories(first: $first, after: $after, orderBy: {field: UPDATED_AT, direction: DESC}) {
      totalCount
      pageInfo {
        hasNextPage
        hasPreviousPage
        endCursor
        startCursor
      }
      edges {
        cursor
        node {
          id
          name
          description
          url
          stargazerCount
          forkCount
          updatedAt
          primaryLanguage {
            name
          }
        }
      }
    }
  }
}
";

/// Query for repository search.
pub const SEARCH_REPOSITORIES_QUERY: &str = r"
query SearchRepositories($queryString: String!, $first: Int!, $after: String) {
  search(query: $queryString, type: REPOSITORY, first: $first, after: $after) {
    repositoryCount
    pageInfo {
      hasNextPage
      hasPreviousPage
      endCursor
      startCursor
    }
    edges {
      cursor
      node {
        ... on Repository {
          id
          name
          description
          url
          stargazerCount
          forkCount
          updatedAt
          primaryLanguage {
            name
          }
        }
      }
    }
  }
}
";

/// Generic GraphQL response envelope.
///
/// GitHub answers 200 for queries that fail at the GraphQL level, putting
/// the failure into `errors` instead; [`GraphQlResponse::into_data`] turns
/// that into [`Error::Graphql`].
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Response payload, absent when the query failed entirely.
    pub data: Option<T>,
    /// GraphQL-level errors, if any.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single entry of a GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message.
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Extracts the payload, surfacing GraphQL errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graphql`] with the first error message when the
    /// `errors` array is non-empty, or [`Error::MalformedResponse`] when
    /// neither data nor errors are present.
    pub fn into_data(self) -> Result<T> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(Error::Graphql {
                message: err.message,
            });
        }
        self.data.ok_or_else(|| Error::MalformedResponse {
            reason: "response carried neither data nor errors".to_string(),
        })
    }
}

/// `data` shape of the viewer repositories query.
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: Viewer,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub repositories: RepositoryConnection,
}

/// `data` shape of the search query.
#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchConnection,
}

/// Paginated repository connection with a `totalCount`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    pub total_count: u64,
    pub page_info: WirePageInfo,
    pub edges: Vec<Edge>,
}

/// Paginated search connection; the count field is named differently.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConnection {
    pub repository_count: u64,
    pub page_info: WirePageInfo,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge {
    pub node: RepoNode,
}

/// One repository node as GitHub's GraphQL API returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoNode {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub updated_at: DateTime<Utc>,
    pub primary_language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct Language {
    pub name: String,
}

impl From<RepoNode> for RepoSnapshot {
    fn from(node: RepoNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            description: node.description,
            url: node.url,
            language: node.primary_language.map(|l| l.name),
            stars: node.stargazer_count,
            forks: node.fork_count,
            updated_at: node.updated_at,
        }
    }
}

impl From<WirePageInfo> for PageInfo {
    fn from(info: WirePageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
        }
    }
}

impl From<RepositoryConnection> for RepoPage {
    fn from(conn: RepositoryConnection) -> Self {
        Self {
            repositories: conn.edges.into_iter().map(|e| e.node.into()).collect(),
            page_info: conn.page_info.into(),
            total_count: conn.total_count,
        }
    }
}

impl From<SearchConnection> for RepoPage {
    fn from(conn: SearchConnection) -> Self {
        Self {
            repositories: conn.edges.into_iter().map(|e| e.node.into()).collect(),
            page_info: conn.page_info.into(),
            total_count: conn.repository_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWER_RESPONSE: &str = r#"
    {
        "data": {
            "viewer": {
                "repositories": {
                    "totalCount": 2,
                    "pageInfo": {
                        "hasNextPage": true,
                        "hasPreviousPage": false,
                        "endCursor": "Y3Vyc29yOjI=",
                        "startCursor": "Y3Vyc29yOjE="
                    },
                    "edges": [
                        {
                            "cursor": "Y3Vyc29yOjE=",
                            "node": {
                                "id": "R_1",
                                "name": "alpha",
                                "description": "first repo",
                                "url": "https://github.com/u/alpha",
                                "stargazerCount": 5,
                                "forkCount": 1,
                                "updatedAt": "2024-04-01T10:00:00Z",
                                "primaryLanguage": { "name": "Rust" }
                            }
                        },
                        {
                            "cursor": "Y3Vyc29yOjI=",
                            "node": {
                                "id": "R_2",
                                "name": "beta",
                                "description": null,
                                "url": "https://github.com/u/beta",
                                "stargazerCount": 0,
                                "forkCount": 0,
                                "updatedAt": "2024-03-01T10:00:00Z",
                                "primaryLanguage": null
                            }
                        }
                    ]
                }
            }
        }
    }
    "#;

    #[test]
    fn viewer_response_maps_to_page() {
        let response: GraphQlResponse<ViewerData> =
            serde_json::from_str(VIEWER_RESPONSE).unwrap();
        let page: RepoPage = response.into_data().unwrap().viewer.repositories.into();

        assert_eq!(page.total_count, 2);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjI="));

        assert_eq!(page.repositories.len(), 2);
        let first = &page.repositories[0];
        assert_eq!(first.id, "R_1");
        assert_eq!(first.url, "https://github.com/u/alpha");
        assert_eq!(first.language.as_deref(), Some("Rust"));
        assert_eq!(first.stars, 5);

        let second = &page.repositories[1];
        assert!(second.description.is_none());
        assert!(second.language.is_none());
    }

    #[test]
    fn search_count_comes_from_repository_count() {
        let json = r#"
        {
            "data": {
                "search": {
                    "repositoryCount": 123,
                    "pageInfo": {
                        "hasNextPage": false,
                        "hasPreviousPage": false,
                        "endCursor": null,
                        "startCursor": null
                    },
                    "edges": []
                }
            }
        }
        "#;
        let response: GraphQlResponse<SearchData> = serde_json::from_str(json).unwrap();
        let page: RepoPage = response.into_data().unwrap().search.into();

        assert_eq!(page.total_count, 123);
        assert!(page.repositories.is_empty());
        assert!(page.page_info.end_cursor.is_none());
    }

    #[test]
    fn errors_array_surfaces_first_message() {
        let json = r#"
        {
            "data": null,
            "errors": [
                { "message": "Bad credentials" },
                { "message": "second error" }
            ]
        }
        "#;
        let response: GraphQlResponse<ViewerData> = serde_json::from_str(json).unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn missing_data_and_errors_is_malformed() {
        let response: GraphQlResponse<ViewerData> = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            response.into_data(),
            Err(crate::Error::MalformedResponse { .. })
        ));
    }
}
