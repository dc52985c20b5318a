//! OAuth 2.0 support for the Lightspeed API client.
//!
//! Lightspeed stores are connected once through the authorization code flow
//! (outside this crate); afterwards the app keeps the store's refresh token
//! and trades it for short-lived access tokens with [`refresh_access_token`].
//! [`TokenManager`](crate::TokenManager) wraps that call and keeps the
//! current token for a session.

mod error;
mod token_refresh;

pub use error::OAuthError;
pub use token_refresh::refresh_access_token;
