//! REST API client for the Lightspeed Retail API.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient):
//!
//! - [`RestClient`]: sends requests with the current access token, applies
//!   the rate/pagination controller, and walks paginated collections
//! - [`RestError`]: error type for REST operations
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::{LightspeedConfig, RestClient};
//! use lightspeed_api::rest::resources::{Category, CategoryListParams};
//!
//! let client = RestClient::new(&config)?;
//! let categories = Category::all(&client, &CategoryListParams::default()).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Error envelopes are retried on the same offset after a fixed pause:
//!
//! - **401**: the access token is refreshed once, then the request is retried after 1 second
//! - **422 / 429**: retried after 10 seconds
//! - **Anything else**: logged and retried after 1 second
//!
//! A request retried `max_retries` times in a row (see
//! [`ThrottlePolicy`](crate::ThrottlePolicy)) fails with
//! [`RestError::MaxRetries`].

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
