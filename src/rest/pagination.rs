//! Offset/limit pagination.
//!
//! Every Lightspeed list response carries an `@attributes` block describing
//! the window it returned:
//!
//! ```json
//! {"@attributes": {"count": "250", "offset": "100", "limit": "100"}, "Item": [...]}
//! ```
//!
//! The values are usually strings. `offset` and `limit` are omitted by
//! endpoints that return everything in one page.

use serde::Deserialize;
use serde_json::Value;

/// Key of the pagination block in a response body.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// The window a page response describes.
///
/// # Example
///
/// ```rust
/// use lightspeed_api::rest::PageCursor;
/// use serde_json::json;
///
/// let body = json!({"@attributes": {"count": "250", "offset": "0", "limit": "100"}});
/// let cursor = PageCursor::from_body(&body).unwrap();
/// assert_eq!(cursor.next_offset(), Some(100));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// Offset of the first record in this page.
    pub offset: u64,
    /// Page size used by the server.
    pub limit: u64,
    /// Total number of records matching the request.
    pub count: u64,
}

/// What the caller should do after a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDecision {
    /// Fetch the page starting at this offset.
    Next(u64),
    /// No further pages.
    Stop,
    /// Re-issue the same request (same offset).
    Retry,
}

impl PageDecision {
    /// Returns `true` if the caller should continue with another page.
    #[must_use]
    pub const fn is_next(&self) -> bool {
        matches!(self, Self::Next(_))
    }
}

#[derive(Deserialize)]
struct RawAttributes {
    count: Option<Value>,
    offset: Option<Value>,
    limit: Option<Value>,
}

impl PageCursor {
    /// Parses the `@attributes` block of a response body.
    ///
    /// Returns `None` if the block or its `count` is missing or malformed.
    /// Missing or malformed `offset`/`limit` default to 0.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let raw = RawAttributes::deserialize(body.get(ATTRIBUTES_KEY)?).ok()?;
        let count = raw.count.as_ref().and_then(number_from)?;
        Some(Self {
            offset: raw.offset.as_ref().and_then(number_from).unwrap_or(0),
            limit: raw.limit.as_ref().and_then(number_from).unwrap_or(0),
            count,
        })
    }

    /// Returns the offset of the following page, if there is one.
    ///
    /// The following page starts at `offset + limit`; it exists only while
    /// that is below `count`. A page without a `limit` is the only page.
    #[must_use]
    pub const fn next_offset(&self) -> Option<u64> {
        let next = self.offset.saturating_add(self.limit);
        if next > self.offset && next < self.count {
            Some(next)
        } else {
            None
        }
    }

    /// Converts the cursor into a pagination decision.
    #[must_use]
    pub const fn decision(&self) -> PageDecision {
        match self.next_offset() {
            Some(next) => PageDecision::Next(next),
            None => PageDecision::Stop,
        }
    }

    /// Returns `true` if the server reports no matching records at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Reads a non-negative integer encoded as a JSON number or numeric string.
fn number_from(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
