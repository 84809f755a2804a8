//! Typed HTTP client over the repodo API surface.

use reqwest::{Client as HttpClient, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};
use url::Url;

use repodo_protocol::{RepoPage, RepoSnapshot, Todo, TodoId, TodoPatch, User};

use crate::error::{ClientError, Result};

/// Cursor/limit pair for the paginated GitHub reads.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Opaque cursor to resume after, `None` for the first page.
    pub cursor: Option<String>,
    /// Requested page size, `None` for the server default.
    pub limit: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    uid: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuccessResponse {
    #[allow(dead_code)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Debug, Serialize)]
struct AuthBody<'a> {
    email: &'a str,
    password: &'a str,
    action: &'a str,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
}

/// Client for the repodo HTTP API.
///
/// Stateless apart from the base URL; session state lives in
/// [`Session`](crate::session::Session).
///
/// # Examples
///
/// ```no_run
/// use repodo_client::ApiClient;
///
/// # async fn example() -> repodo_client::Result<()> {
/// let client = ApiClient::from_url("http://127.0.0.1:8080")?;
/// let todos = client.todos("u1").await?;
/// println!("{} todos", todos.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    /// Creates a client from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid URL.
    pub fn from_url(base_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    /// The base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Auth

    /// Registers an account and returns the created user.
    ///
    /// # Errors
    ///
    /// Returns the server's message on rejection, for example
    /// "This email is already registered" or "Password is too weak".
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User> {
        let body = AuthBody {
            email,
            password,
            action: "signup",
            display_name,
        };
        let response: AuthResponse = self.post("/api/auth", &body).await?;
        Ok(User::new(response.user.uid, response.user.email))
    }

    /// Logs in and returns the user.
    ///
    /// # Errors
    ///
    /// Returns "Invalid credentials" (401) for an unknown email or a wrong
    /// password.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = AuthBody {
            email,
            password,
            action: "login",
            display_name: None,
        };
        let response: AuthResponse = self.post("/api/auth", &body).await?;
        Ok(User::new(response.user.uid, response.user.email))
    }

    /// Tells the server the session ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn logout(&self) -> Result<()> {
        let _: SuccessResponse = self.get("/api/auth").await?;
        Ok(())
    }

    // Todos

    /// Lists a user's todos in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn todos(&self, user_id: &str) -> Result<Vec<Todo>> {
        self.get(&format!("/api/todos?userId={user_id}")).await
    }

    /// Creates a todo.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_todo(&self, user_id: &str, text: &str) -> Result<Todo> {
        let body = serde_json::json!({ "userId": user_id, "text": text });
        self.post("/api/todos", &body).await
    }

    /// Applies a partial update and returns the updated todo.
    ///
    /// # Errors
    ///
    /// Returns "Todo not found" (404) for an unknown id and a 400 when the
    /// patch is empty.
    pub async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo> {
        self.put(&format!("/api/todos/{id}"), patch).await
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns "Todo not found" (404) for an unknown id.
    pub async fn delete_todo(&self, id: TodoId) -> Result<()> {
        let _: SuccessResponse = self.delete(&format!("/api/todos/{id}")).await?;
        Ok(())
    }

    /// Deletes a user's completed todos, returning how many went away.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_completed(&self, user_id: &str) -> Result<u64> {
        let response: CountResponse = self
            .delete(&format!("/api/todos/completed?userId={user_id}"))
            .await?;
        Ok(response.count)
    }

    // Favorites

    /// Lists a user's favorite snapshots in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn favorites(&self, user_id: &str) -> Result<Vec<RepoSnapshot>> {
        self.get(&format!("/api/favorites?userId={user_id}")).await
    }

    /// Adds (or refreshes) a favorite snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_favorite(&self, user_id: &str, repository: &RepoSnapshot) -> Result<()> {
        let body = serde_json::json!({ "userId": user_id, "repository": repository });
        let _: SuccessResponse = self.post("/api/favorites", &body).await?;
        Ok(())
    }

    /// Removes a favorite by repository id.
    ///
    /// # Errors
    ///
    /// Returns a 404 for a repository id that was never favorited.
    pub async fn remove_favorite(&self, user_id: &str, repository_id: &str) -> Result<()> {
        let mut url = self.base_url.join("/api/favorites")?;
        url.query_pairs_mut()
            .append_pair("userId", user_id)
            .append_pair("repositoryId", repository_id);
        let _: SuccessResponse = self.request(Method::DELETE, url, None::<&()>, None).await?;
        Ok(())
    }

    // GitHub proxy

    /// Fetches one page of the token owner's repositories.
    ///
    /// # Errors
    ///
    /// Returns "Authentication token is required" (401) when the server
    /// rejects the token.
    #[instrument(skip(self, token))]
    pub async fn repositories(&self, token: &SecretString, page: &Page) -> Result<RepoPage> {
        let mut url = self.base_url.join("/api/github/repositories")?;
        append_page(&mut url, page);
        self.request(Method::GET, url, None::<&()>, Some(token)).await
    }

    /// Searches repositories.
    ///
    /// An empty or whitespace query is rejected with
    /// [`ClientError::EmptySearch`] before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptySearch`] or the server's message.
    #[instrument(skip(self, token))]
    pub async fn search(&self, token: &SecretString, query: &str, page: &Page) -> Result<RepoPage> {
        if query.trim().is_empty() {
            return Err(ClientError::EmptySearch);
        }

        let mut url = self.base_url.join("/api/github/search")?;
        url.query_pairs_mut().append_pair("query", query);
        append_page(&mut url, page);
        self.request(Method::GET, url, None::<&()>, Some(token)).await
    }

    // Request plumbing

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        self.request(Method::GET, url, None::<&()>, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path)?;
        self.request(Method::POST, url, Some(body), None).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path)?;
        self.request(Method::PUT, url, Some(body), None).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        self.request(Method::DELETE, url, None::<&()>, None).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        token: Option<&SecretString>,
    ) -> Result<T> {
        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        handle_response(request.send().await?).await
    }
}

fn append_page(url: &mut Url, page: &Page) {
    let mut pairs = url.query_pairs_mut();
    if let Some(cursor) = &page.cursor {
        pairs.append_pair("cursor", cursor);
    }
    if let Some(limit) = page.limit {
        pairs.append_pair("limit", &limit.to_string());
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }

    // Non-2xx bodies are `{error: "..."}`; fall back to the status line
    // when the body is not in that shape.
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.to_string());
    debug!(%status, %message, "API request rejected");
    Err(ClientError::Api { status, message })
}
