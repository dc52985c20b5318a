//! Configuration types for the Lightspeed API client.
//!
//! This module provides the static, per-session configuration: OAuth client
//! credentials, the store's refresh token and account ID, endpoint URLs and
//! the throttling policy.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`LightspeedConfig`]: The configuration struct holding all session settings
//! - [`LightspeedConfigBuilder`]: A builder for constructing [`LightspeedConfig`] instances
//! - [`ClientId`], [`ClientSecret`], [`RefreshToken`]: validated credential newtypes
//! - [`AccountId`]: a validated numeric account ID
//! - [`ApiUrl`]: a validated absolute URL
//! - [`ThrottlePolicy`]: unit costs, retry pauses and the retry ceiling
//!
//! # Example
//!
//! ```rust
//! use lightspeed_api::{LightspeedConfig, ClientId, ClientSecret, RefreshToken, AccountId};
//!
//! let config = LightspeedConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .refresh_token(RefreshToken::new("my-refresh-token").unwrap())
//!     .account_id(AccountId::new("12345").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.account_url(), "https://api.lightspeedapp.com/API/Account/12345/");
//! ```

mod newtypes;
mod policy;

pub use newtypes::{AccountId, ApiUrl, ClientId, ClientSecret, RefreshToken};
pub use policy::{
    ThrottlePolicy, AUTH_RETRY_DELAY, DEFAULT_MAX_RETRIES, ERROR_RETRY_DELAY, READ_UNIT_COST,
    THROTTLE_RETRY_DELAY, WRITE_UNIT_COST,
};

use crate::error::ConfigError;

/// Default base URL of the Lightspeed Retail API.
pub const DEFAULT_API_URL: &str = "https://api.lightspeedapp.com/API/Account/";

/// Default OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://cloud.lightspeedapp.com/oauth/access_token.php";

/// Configuration for one Lightspeed store session.
///
/// Everything in here is immutable for the lifetime of a session. The
/// mutable part of the credentials (the access token and its lifetime)
/// lives in [`Session`](crate::Session) and is owned by a
/// [`TokenManager`](crate::TokenManager).
///
/// # Thread Safety
///
/// `LightspeedConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct LightspeedConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    refresh_token: RefreshToken,
    account_id: AccountId,
    api_url: ApiUrl,
    token_url: ApiUrl,
    token_type: String,
    scope: Option<String>,
    user_agent_prefix: Option<String>,
    throttle: ThrottlePolicy,
}

impl LightspeedConfig {
    /// Creates a new builder for constructing a `LightspeedConfig`.
    #[must_use]
    pub fn builder() -> LightspeedConfigBuilder {
        LightspeedConfigBuilder::new()
    }

    /// Returns the OAuth client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the store's refresh token.
    #[must_use]
    pub const fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Returns the store's account ID.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Returns the API base URL (without the account segment).
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the OAuth token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &ApiUrl {
        &self.token_url
    }

    /// Returns the token type reported for this store (usually `bearer`).
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the granted scope, if known.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the throttling policy.
    #[must_use]
    pub const fn throttle(&self) -> &ThrottlePolicy {
        &self.throttle
    }

    /// Returns the account-scoped URL all resource paths are joined to.
    ///
    /// The result always ends with a slash, e.g.
    /// `https://api.lightspeedapp.com/API/Account/12345/`.
    #[must_use]
    pub fn account_url(&self) -> String {
        format!("{}{}/", self.api_url.with_trailing_slash(), self.account_id)
    }
}

// Verify LightspeedConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LightspeedConfig>();
};

/// Builder for constructing [`LightspeedConfig`] instances.
///
/// Required fields are `client_id`, `client_secret`, `refresh_token` and
/// `account_id`.
///
/// # Defaults
///
/// - `api_url`: [`DEFAULT_API_URL`]
/// - `token_url`: [`DEFAULT_TOKEN_URL`]
/// - `token_type`: `"bearer"`
/// - `scope`: `None`
/// - `user_agent_prefix`: `None`
/// - `throttle`: [`ThrottlePolicy::default`]
#[derive(Debug, Default)]
pub struct LightspeedConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    refresh_token: Option<RefreshToken>,
    account_id: Option<AccountId>,
    api_url: Option<ApiUrl>,
    token_url: Option<ApiUrl>,
    token_type: Option<String>,
    scope: Option<String>,
    user_agent_prefix: Option<String>,
    throttle: Option<ThrottlePolicy>,
}

impl LightspeedConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the store's refresh token (required).
    #[must_use]
    pub fn refresh_token(mut self, token: RefreshToken) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Sets the store's account ID (required).
    #[must_use]
    pub fn account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Overrides the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: ApiUrl) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Sets the token type recorded for the store.
    #[must_use]
    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// Sets the scope granted to the store's token.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the throttling and retry policy.
    #[must_use]
    pub fn throttle(mut self, policy: ThrottlePolicy) -> Self {
        self.throttle = Some(policy);
        self
    }

    /// Builds the [`LightspeedConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a required field is
    /// not set, or [`ConfigError::InvalidThrottlePolicy`] if the policy is
    /// unusable.
    pub fn build(self) -> Result<LightspeedConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self.client_secret.ok_or(ConfigError::MissingRequiredField {
            field: "client_secret",
        })?;
        let refresh_token = self.refresh_token.ok_or(ConfigError::MissingRequiredField {
            field: "refresh_token",
        })?;
        let account_id = self.account_id.ok_or(ConfigError::MissingRequiredField {
            field: "account_id",
        })?;

        let api_url = match self.api_url {
            Some(url) => url,
            None => ApiUrl::new(DEFAULT_API_URL)?,
        };
        let token_url = match self.token_url {
            Some(url) => url,
            None => ApiUrl::new(DEFAULT_TOKEN_URL)?,
        };

        let throttle = self.throttle.unwrap_or_default();
        throttle.validate()?;

        Ok(LightspeedConfig {
            client_id,
            client_secret,
            refresh_token,
            account_id,
            api_url,
            token_url,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
            scope: self.scope,
            user_agent_prefix: self.user_agent_prefix,
            throttle,
        })
    }
}
