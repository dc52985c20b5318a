//! Authentication types for the Lightspeed API client.
//!
//! This module provides:
//!
//! - [`Session`]: the mutable token state of one store session
//! - [`TokenManager`]: holds the session and refreshes it in place
//! - [`AccessTokenSource`]: the narrow interface accessors depend on
//! - [`oauth`]: the refresh-token grant
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::{TokenManager, AccessTokenSource};
//!
//! let tokens = TokenManager::new(config);
//! tokens.refresh().await?;
//! ```

pub mod oauth;
pub mod session;
mod token_manager;

pub use session::{AccessTokenResponse, Session};
pub use token_manager::{AccessTokenSource, TokenManager};
