//! OAuth-specific error types for the Lightspeed API client.
//!
//! # Example
//!
//! ```rust
//! use lightspeed_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenRefreshFailed {
//!     status: 400,
//!     message: "invalid_grant".to_string(),
//! };
//! assert!(error.to_string().contains("invalid_grant"));
//! ```

use thiserror::Error;

/// Errors that can occur while talking to the identity provider.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The refresh-token grant failed.
    ///
    /// `status` is the HTTP status of the token endpoint's reply, or `0`
    /// when the request never got a response (network failure).
    #[error("Token refresh failed with status {status}: {message}")]
    TokenRefreshFailed {
        /// The HTTP status code returned (0 for network errors).
        status: u16,
        /// The error message from the response.
        message: String,
    },
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
