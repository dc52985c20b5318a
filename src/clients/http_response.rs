//! HTTP response types for the Lightspeed API client.
//!
//! This module provides the [`HttpResponse`] type: the status code, the
//! lowercased response headers and the JSON body of one API call.

use std::collections::HashMap;

/// Header carrying the rate limiter's bucket level as `"<level>/<capacity>"`.
pub const BUCKET_LEVEL_HEADER: &str = "x-ls-api-bucket-level";

/// Header carrying the rate limiter's drip rate in units per second.
pub const DRIP_RATE_HEADER: &str = "x-ls-api-drip-rate";

/// An HTTP response from the Lightspeed API.
///
/// Header names are stored lowercased; a header may have multiple values.
/// A body that is not valid JSON is kept as `{"raw_body": "<text>"}` so the
/// controller can still log it.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use lightspeed_api::clients::HttpResponse;
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ls-api-bucket-level".to_string(), vec!["12/60".to_string()]);
///
/// let response = HttpResponse::new(200, headers, json!({"Category": []}));
/// assert!(response.is_ok());
/// assert_eq!(response.header("X-LS-API-Bucket-Level"), Some("12/60"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw `x-ls-api-bucket-level` header value, if present.
    #[must_use]
    pub fn bucket_level(&self) -> Option<&str> {
        self.header(BUCKET_LEVEL_HEADER)
    }

    /// Returns the raw `x-ls-api-drip-rate` header value, if present.
    #[must_use]
    pub fn drip_rate(&self) -> Option<&str> {
        self.header(DRIP_RATE_HEADER)
    }

    /// Parses a response body, keeping non-JSON text under `raw_body`.
    #[must_use]
    pub fn parse_body(text: &str) -> serde_json::Value {
        if text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw_body": text }))
    }
}
