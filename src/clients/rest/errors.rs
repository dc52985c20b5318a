//! REST-specific error types for the Lightspeed API client.
//!
//! This module contains the error type returned by [`RestClient`] and the
//! resource accessors built on it.
//!
//! # Error Handling
//!
//! Provider error envelopes are not errors: the controller retries them.
//! A call only fails when:
//!
//! - [`RestError::InvalidPath`]: a resource path is empty
//! - [`RestError::Http`]: the request could not be sent
//! - [`RestError::Auth`]: refreshing an expired access token failed
//! - [`RestError::MaxRetries`]: the same page or write kept failing
//! - [`RestError::MissingCollection`]: a page reported records but carried none
//! - [`RestError::Deserialize`]: a record did not match its type
//! - [`RestError::Io`] / [`RestError::Serialize`]: writing the audit log or a snapshot failed
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::resources::{Category, CategoryListParams};
//! use lightspeed_api::RestError;
//!
//! match Category::all(&client, &CategoryListParams::default()).await {
//!     Ok(categories) => println!("{} categories", categories.len()),
//!     Err(RestError::MaxRetries { path, last_status, .. }) => {
//!         println!("{path} kept failing with {last_status}");
//!     }
//!     Err(e) => println!("error: {e}"),
//! }
//! ```

use crate::auth::oauth::OAuthError;
use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use lightspeed_api::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
///
/// let error = RestError::MaxRetries {
///     path: "Item.json".to_string(),
///     attempts: 6,
///     last_status: 503,
/// };
/// assert!(error.to_string().contains("Item.json"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The access token expired and could not be refreshed.
    #[error(transparent)]
    Auth(#[from] OAuthError),

    /// The same request was retried too many times.
    #[error("Gave up on {path} after {attempts} attempts (last status {last_status})")]
    MaxRetries {
        /// The path that kept failing.
        path: String,
        /// Number of requests sent for this page or write.
        attempts: u32,
        /// HTTP status of the last response.
        last_status: u16,
    },

    /// A page reported records but did not contain the collection key.
    #[error("Response for {path} is missing the '{key}' collection")]
    MissingCollection {
        /// The collection key that was expected (e.g. `Category`).
        key: &'static str,
        /// The path that was requested.
        path: String,
    },

    /// A record could not be deserialized into its type.
    #[error("Failed to deserialize {resource} record: {source}")]
    Deserialize {
        /// The resource name.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the audit log or a snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a request body or snapshot failed.
    #[error("Failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

// Verify RestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InvalidHttpRequestError;

    #[test]
    fn test_invalid_path_error_with_empty_path() {
        let error = RestError::InvalidPath {
            path: String::new(),
        };
        assert_eq!(error.to_string(), "Invalid REST API path: ");
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::InvalidRequest(InvalidHttpRequestError::EmptyPath);
        let rest_error: RestError = http_error.into();
        assert!(matches!(rest_error, RestError::Http(_)));
    }

    #[test]
    fn test_from_oauth_error_conversion() {
        let oauth = OAuthError::TokenRefreshFailed {
            status: 400,
            message: "invalid_grant".to_string(),
        };
        let rest_error: RestError = oauth.into();
        assert!(matches!(rest_error, RestError::Auth(_)));
        assert!(rest_error.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_max_retries_message() {
        let error = RestError::MaxRetries {
            path: "Category.json".to_string(),
            attempts: 6,
            last_status: 422,
        };
        let message = error.to_string();
        assert!(message.contains("Category.json"));
        assert!(message.contains('6'));
        assert!(message.contains("422"));
    }

    #[test]
    fn test_missing_collection_message() {
        let error = RestError::MissingCollection {
            key: "Order",
            path: "Order.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Response for Order.json is missing the 'Order' collection"
        );
    }

    #[test]
    fn test_deserialize_error_keeps_source() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let error = RestError::Deserialize {
            resource: "Item",
            source,
        };
        assert!(error.to_string().starts_with("Failed to deserialize Item record"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: RestError = io.into();
        assert!(matches!(error, RestError::Io(_)));
    }
}
