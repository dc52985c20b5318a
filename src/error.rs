//! Error types for the Lightspeed API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use lightspeed_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the OAuth client ID of your Lightspeed app.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the OAuth client secret of your Lightspeed app.")]
    EmptyClientSecret,

    /// Refresh token cannot be empty.
    #[error("Refresh token cannot be empty. Please provide the refresh token issued for the store.")]
    EmptyRefreshToken,

    /// Account ID is invalid.
    #[error("Invalid account ID '{account_id}'. Expected a non-empty numeric Lightspeed account ID.")]
    InvalidAccountId {
        /// The invalid account ID that was provided.
        account_id: String,
    },

    /// A URL is invalid.
    #[error("Invalid URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.lightspeedapp.com/API/Account/').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A throttle policy value is out of range.
    #[error("Invalid throttle policy: {reason}")]
    InvalidThrottlePolicy {
        /// The reason the policy is invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
