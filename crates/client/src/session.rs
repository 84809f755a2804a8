//! The client-side auth session.
//!
//! A small state machine: unauthenticated, authenticating while a sign-in
//! call is in flight, authenticated with the returned user, and back to
//! unauthenticated on logout. Tokens attached to the user come from the
//! local [`TokenStore`] and are never sent to the auth endpoints.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use repodo_config::TokenStore;
use repodo_protocol::{AuthProvider, User};

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// Where the session currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No user; the initial and post-logout state.
    #[default]
    Unauthenticated,
    /// A sign-in call is in flight.
    Authenticating,
    /// Signed in, with or without a GitHub token attached.
    Authenticated(User),
}

/// Auth session over an [`ApiClient`] and the local token store.
pub struct Session {
    api: ApiClient,
    tokens: TokenStore,
    state: AuthState,
}

impl Session {
    /// Creates a fresh, unauthenticated session.
    #[must_use]
    pub fn new(api: ApiClient, tokens: TokenStore) -> Self {
        Self {
            api,
            tokens,
            state: AuthState::Unauthenticated,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Which provider backs the current session.
    ///
    /// GitHub when a token is attached, password otherwise.
    #[must_use]
    pub fn provider(&self) -> AuthProvider {
        match self.user() {
            Some(user) if user.has_github_token() => AuthProvider::GitHub,
            _ => AuthProvider::Password,
        }
    }

    /// Signs in with email and password.
    ///
    /// On success a GitHub token previously cached in the token store is
    /// attached to the in-memory user. A sign-in failure returns the
    /// session to unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error with a user-facing message; see
    /// [`login_error_message`] for the mapping.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.state = AuthState::Authenticating;
        match self.api.login(email, password).await {
            Ok(user) => Ok(self.finish_sign_in(user)),
            Err(err) => {
                self.state = AuthState::Unauthenticated;
                Err(err)
            }
        }
    }

    /// Registers an account and signs in.
    ///
    /// # Errors
    ///
    /// Returns an error with a user-facing message; see
    /// [`signup_error_message`] for the mapping.
    #[instrument(skip(self, password))]
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User> {
        self.state = AuthState::Authenticating;
        match self.api.signup(email, password, Some(name)).await {
            Ok(mut user) => {
                user.display_name = Some(name.to_string());
                Ok(self.finish_sign_in(user))
            }
            Err(err) => {
                self.state = AuthState::Unauthenticated;
                Err(err)
            }
        }
    }

    /// Signs out, clearing both the session and the stored GitHub token.
    ///
    /// The session goes unauthenticated even when the server call fails;
    /// the caller only loses the acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error if the server call or the token-store wipe fails.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<()> {
        self.state = AuthState::Unauthenticated;
        let result = self.api.logout().await;
        self.tokens.clear()?;
        result
    }

    /// Caches a GitHub token and attaches it to the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn save_github_token(&mut self, token: SecretString) -> Result<()> {
        self.tokens.save(&token)?;
        if let AuthState::Authenticated(user) = &mut self.state {
            user.github_token = Some(token.expose_secret().to_string());
        }
        Ok(())
    }

    fn finish_sign_in(&mut self, mut user: User) -> User {
        match self.tokens.load() {
            Ok(Some(token)) => {
                debug!("attaching cached GitHub token to session");
                user.github_token = Some(token.expose_secret().to_string());
            }
            Ok(None) => {}
            // A broken token store must not block sign-in.
            Err(err) => warn!(error = %err, "could not read cached GitHub token"),
        }
        self.state = AuthState::Authenticated(user.clone());
        user
    }
}

/// Maps a sign-in failure to the message shown to the user.
///
/// Known provider messages pass through; everything else collapses to a
/// generic retry prompt.
#[must_use]
pub fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. }
            if message == "Invalid credentials"
                || message == "Too many failed attempts. Please try again later." =>
        {
            message.clone()
        }
        _ => "Error during login. Please try again.".to_string(),
    }
}

/// Maps a registration failure to the message shown to the user.
#[must_use]
pub fn signup_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. }
            if message == "This email is already registered"
                || message == "Password is too weak"
                || message == "Invalid email address" =>
        {
            message.clone()
        }
        _ => "Error during registration. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tempfile::TempDir;

    fn session_with_store(dir: &TempDir) -> Session {
        let api = ApiClient::from_url("http://127.0.0.1:8080").unwrap();
        let tokens = TokenStore::with_path(dir.path().join("github_token"));
        Session::new(api, tokens)
    }

    fn api_error(status: StatusCode, message: &str) -> ClientError {
        ClientError::Api {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn starts_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let session = session_with_store(&dir);
        assert_eq!(session.state(), &AuthState::Unauthenticated);
        assert!(session.user().is_none());
        assert_eq!(session.provider(), AuthProvider::Password);
    }

    #[tokio::test]
    async fn failed_login_returns_to_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_store(&dir);

        // Nothing listens on the base URL, so the call fails.
        assert!(session.login("ada@example.com", "pw").await.is_err());
        assert_eq!(session.state(), &AuthState::Unauthenticated);
    }

    #[test]
    fn saved_token_switches_provider() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_store(&dir);
        session.state = AuthState::Authenticated(User::new("u1", None));

        session
            .save_github_token(SecretString::from("gho_abc".to_string()))
            .unwrap();
        assert_eq!(session.provider(), AuthProvider::GitHub);
        assert!(session.user().unwrap().has_github_token());
    }

    #[test]
    fn known_login_errors_pass_through() {
        let err = api_error(StatusCode::UNAUTHORIZED, "Invalid credentials");
        assert_eq!(login_error_message(&err), "Invalid credentials");

        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(
            login_error_message(&err),
            "Error during login. Please try again."
        );
    }

    #[test]
    fn known_signup_errors_pass_through() {
        let err = api_error(StatusCode::BAD_REQUEST, "Password is too weak");
        assert_eq!(signup_error_message(&err), "Password is too weak");

        let err = api_error(StatusCode::BAD_REQUEST, "Invalid email address");
        assert_eq!(signup_error_message(&err), "Invalid email address");

        let err = ClientError::EmptySearch;
        assert_eq!(
            signup_error_message(&err),
            "Error during registration. Please try again."
        );
    }
}
