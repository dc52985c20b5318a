//! Token management for one store session.
//!
//! [`TokenManager`] owns the mutable [`Session`] of a store and refreshes it
//! through the refresh-token grant. Accessors only see it through the narrow
//! [`AccessTokenSource`] trait: "give me the current token" and "refresh it".

use std::future::Future;

use tokio::sync::RwLock;

use crate::auth::oauth::{refresh_access_token, OAuthError};
use crate::auth::Session;
use crate::config::LightspeedConfig;

/// A source of bearer tokens that can be refreshed on demand.
///
/// [`RestClient`](crate::clients::RestClient) reads the token before every
/// request and calls [`refresh`](Self::refresh) exactly once per
/// expired-token envelope.
pub trait AccessTokenSource: Send + Sync {
    /// Returns the current access token.
    fn access_token(&self) -> impl Future<Output = String> + Send;

    /// Obtains a new access token and makes it current.
    fn refresh(&self) -> impl Future<Output = Result<(), OAuthError>> + Send;
}

/// Holds the current access token of a store and refreshes it in place.
///
/// # Example
///
/// ```rust,ignore
/// use lightspeed_api::{TokenManager, AccessTokenSource};
///
/// let tokens = TokenManager::new(config.clone());
/// tokens.refresh().await?;
/// println!("token: {}", tokens.access_token().await);
/// ```
#[derive(Debug)]
pub struct TokenManager {
    config: LightspeedConfig,
    http: reqwest::Client,
    session: RwLock<Session>,
}

// Verify TokenManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenManager>();
};

impl TokenManager {
    /// Creates a manager without an access token.
    ///
    /// The first API call will come back as an expired-token envelope and
    /// trigger a refresh; call [`refresh`](AccessTokenSource::refresh) up
    /// front to avoid that round trip.
    #[must_use]
    pub fn new(config: LightspeedConfig) -> Self {
        Self::with_session(config, Session::empty())
    }

    /// Creates a manager seeded with an existing session.
    #[must_use]
    pub fn with_session(config: LightspeedConfig, session: Session) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: RwLock::new(session),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &LightspeedConfig {
        &self.config
    }

    /// Returns a copy of the current session state.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }
}

impl AccessTokenSource for TokenManager {
    async fn access_token(&self) -> String {
        self.session.read().await.access_token.clone()
    }

    async fn refresh(&self) -> Result<(), OAuthError> {
        let response = refresh_access_token(&self.http, &self.config).await?;

        if response.refresh_token.is_some() {
            tracing::debug!(
                "Token endpoint rotated the refresh token; the configured token is kept"
            );
        }

        let mut session = self.session.write().await;
        *session = Session::from_access_token_response(&response);

        tracing::debug!(
            account_id = %self.config.account_id(),
            expires_in = ?session.expires_in,
            "Refreshed Lightspeed access token"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountId, ApiUrl, ClientId, ClientSecret, RefreshToken};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(token_url: &str) -> LightspeedConfig {
        LightspeedConfig::builder()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .refresh_token(RefreshToken::new("refresh").unwrap())
            .account_id(AccountId::new("5").unwrap())
            .token_url(ApiUrl::new(token_url).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_manager_starts_without_token() {
        let manager = TokenManager::new(create_config("http://127.0.0.1:9/token"));
        assert_eq!(manager.access_token().await, "");
        assert!(!manager.session().await.is_active());
    }

    #[tokio::test]
    async fn test_with_session_seeds_token() {
        let manager = TokenManager::with_session(
            create_config("http://127.0.0.1:9/token"),
            Session::new("seeded".to_string(), Some(60)),
        );
        assert_eq!(manager.access_token().await, "seeded");
    }

    #[tokio::test]
    async fn test_refresh_replaces_token_and_lifetime() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/access_token.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "renewed",
                "expires_in": 1800
            })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = TokenManager::with_session(
            create_config(&format!("{}/oauth/access_token.php", server.uri())),
            Session::new("old".to_string(), Some(1)),
        );

        manager.refresh().await.unwrap();

        let session = manager.session().await;
        assert_eq!(session.access_token, "renewed");
        assert_eq!(session.expires_in, Some(1800));
        assert_eq!(manager.access_token().await, "renewed");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let manager = TokenManager::with_session(
            create_config(&format!("{}/oauth/access_token.php", server.uri())),
            Session::new("old".to_string(), None),
        );

        let result = manager.refresh().await;
        assert!(matches!(
            result,
            Err(OAuthError::TokenRefreshFailed { status: 400, .. })
        ));
        assert_eq!(manager.access_token().await, "old");
    }
}
