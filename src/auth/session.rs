//! Session state for Lightspeed API authentication.
//!
//! This module provides the [`Session`] type (the mutable half of a store's
//! credentials) and [`AccessTokenResponse`], the identity provider's reply
//! to a refresh-token grant.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The mutable token state of one store session.
///
/// The access token and its lifetime are replaced in place every time the
/// token is refreshed. Everything else about the session is static and
/// lives in [`LightspeedConfig`](crate::LightspeedConfig).
///
/// # Example
///
/// ```rust
/// use lightspeed_api::Session;
///
/// let session = Session::new("access-token".to_string(), Some(1800));
/// assert!(session.is_active());
/// assert!(!session.expired());
///
/// let empty = Session::empty();
/// assert!(!empty.is_active());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The access token for API authentication.
    pub access_token: String,

    /// Lifetime of the access token in seconds, as reported by the provider.
    pub expires_in: Option<i64>,

    /// When the access token expires, derived from `expires_in`.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session for a token issued now with the given lifetime.
    #[must_use]
    pub fn new(access_token: String, expires_in: Option<i64>) -> Self {
        Self {
            access_token,
            expires_in,
            expires: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    /// Creates a session with no token yet; the first request will have to
    /// refresh before it can succeed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            access_token: String::new(),
            expires_in: None,
            expires: None,
        }
    }

    /// Creates a session from a token response.
    #[must_use]
    pub fn from_access_token_response(response: &AccessTokenResponse) -> Self {
        Self::new(response.access_token.clone(), response.expires_in)
    }

    /// Returns `true` if the access token has expired.
    ///
    /// Sessions without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if the session has a token that has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

/// Response of the OAuth token endpoint for a refresh-token grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// The new access token.
    pub access_token: String,
    /// Lifetime of the new token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Token type, usually `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scope granted to the token.
    #[serde(default)]
    pub scope: Option<String>,
    /// A rotated refresh token, if the provider issued one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
