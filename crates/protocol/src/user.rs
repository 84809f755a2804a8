//! The session user and its authentication provider.

use serde::{Deserialize, Serialize};

/// Which identity provider authenticated a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthProvider {
    /// Email/password sign-in.
    #[default]
    #[serde(rename = "password")]
    Password,
    /// GitHub OAuth sign-in.
    #[serde(rename = "github")]
    GitHub,
}

/// An authenticated user.
///
/// The `github_token` is never part of the wire shape: it is cached in
/// local persistence and attached to the in-memory user after sign-in, and
/// is skipped by serde in both directions.
///
/// # Examples
///
/// ```
/// use repodo_protocol::User;
///
/// let user = User::new("u1", Some("ada@example.com".to_string()));
/// assert!(!user.has_github_token());
/// assert_eq!(user.name(), "GitHub User");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub uid: String,
    /// Email address, if the provider supplied one.
    pub email: Option<String>,
    /// Display name, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "photoURL")]
    pub avatar_url: Option<String>,
    /// GitHub access token attached after sign-in. Never serialized.
    #[serde(skip)]
    pub github_token: Option<String>,
}

impl User {
    /// Creates a user with just an id and email.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            ..Default::default()
        }
    }

    /// Returns `true` if a GitHub token is attached to this user.
    #[must_use]
    pub fn has_github_token(&self) -> bool {
        self.github_token.is_some()
    }

    /// Returns the display name, falling back to a generic label.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("GitHub User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_when_unset() {
        let user = User::new("u1", None);
        assert_eq!(user.name(), "GitHub User");

        let named = User {
            display_name: Some("Ada".to_string()),
            ..user
        };
        assert_eq!(named.name(), "Ada");
    }

    #[test]
    fn github_token_never_serialized() {
        let user = User {
            uid: "u1".to_string(),
            email: Some("ada@example.com".to_string()),
            github_token: Some("gho_secret".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("gho_secret"));
        assert!(!json.contains("githubToken"));
    }

    #[test]
    fn avatar_url_uses_original_wire_name() {
        let user = User {
            uid: "u1".to_string(),
            avatar_url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("photoURL").is_some());
    }

    #[test]
    fn provider_wire_names() {
        let json = serde_json::to_string(&AuthProvider::GitHub).expect("serialize");
        assert_eq!(json, r#""github""#);
        let json = serde_json::to_string(&AuthProvider::Password).expect("serialize");
        assert_eq!(json, r#""password""#);
    }
}
