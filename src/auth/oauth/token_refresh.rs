//! Refresh-token grant against the Lightspeed identity provider.
//!
//! Lightspeed access tokens are short lived (typically 30 minutes). A store's
//! long-lived refresh token, together with the app's client credentials, is
//! exchanged for a new access token by POSTing a form to the token endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::auth::oauth::refresh_access_token;
//!
//! let http = reqwest::Client::new();
//! let response = refresh_access_token(&http, &config).await?;
//! println!("New token expires in {:?} seconds", response.expires_in);
//! ```

use crate::auth::oauth::OAuthError;
use crate::auth::session::AccessTokenResponse;
use crate::config::LightspeedConfig;
use serde::Serialize;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Form body for a token refresh.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest<'a> {
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

/// Exchanges the configured refresh token for a new access token.
///
/// No retry happens at this layer: a rejected grant is returned to the
/// caller as an error.
///
/// # Errors
///
/// Returns [`OAuthError::TokenRefreshFailed`] if the request cannot be sent,
/// the provider answers with a non-2xx status, or the reply is not a valid
/// token response.
pub async fn refresh_access_token(
    http: &reqwest::Client,
    config: &LightspeedConfig,
) -> Result<AccessTokenResponse, OAuthError> {
    let request_body = TokenRefreshRequest {
        refresh_token: config.refresh_token().as_ref(),
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        grant_type: REFRESH_TOKEN_GRANT_TYPE,
    };

    let response = http
        .post(config.token_url().as_ref())
        .form(&request_body)
        .send()
        .await
        .map_err(|e| OAuthError::TokenRefreshFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(OAuthError::TokenRefreshFailed {
            status,
            message: error_body,
        });
    }

    response
        .json::<AccessTokenResponse>()
        .await
        .map_err(|e| OAuthError::TokenRefreshFailed {
            status,
            message: format!("Failed to parse token response: {e}"),
        })
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenRefreshRequest<'_>>();
};
