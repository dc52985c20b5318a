//! HTTP client types for Lightspeed API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to one Lightspeed account.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response, including the rate limit headers
//! - [`HttpMethod`]: Supported HTTP methods (GET, PUT)
//! - [`rest::RestClient`]: Higher-level client with throttling and pagination
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "Category.json")
//!     .query_param("offset", "0")
//!     .build()?;
//!
//! let response = client.request(&request, "access-token").await?;
//! println!("{:?}", response.bucket_level());
//! ```
//!
//! The transport never retries; see [`rest`] for the retry rules.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, BUCKET_LEVEL_HEADER, DRIP_RATE_HEADER};

pub use rest::{RestClient, RestError};
