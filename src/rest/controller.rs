//! The rate/pagination controller.
//!
//! Every response goes through two steps:
//!
//! 1. [`classify`] turns it into an [`ApiResponse`]: a page (bucket headers
//!    plus an optional cursor), an error envelope, or something unparseable.
//! 2. [`plan`] decides how long to pause, whether to refresh the access
//!    token, and which [`PageDecision`] to hand back to the caller.
//!
//! Both are pure. [`RestClient`](crate::clients::RestClient) applies the
//! resulting [`ControlPlan`].

use std::time::Duration;

use crate::clients::{HttpMethod, HttpResponse};
use crate::config::ThrottlePolicy;
use crate::rest::envelope::{ErrorEnvelope, ErrorKind};
use crate::rest::pagination::{PageCursor, PageDecision, ATTRIBUTES_KEY};
use crate::rest::rate_limit::BucketState;

/// Classification of one API response.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
    /// A successful response with valid rate limit headers.
    ///
    /// `cursor` is `None` for responses that are not paginated (single
    /// records and writes); those are always the final page.
    Page {
        /// Rate limiter state after this request.
        bucket: BucketState,
        /// Pagination window, if the body carried one.
        cursor: Option<PageCursor>,
    },
    /// A Lightspeed error body.
    ErrorEnvelope(ErrorEnvelope),
    /// Neither a page nor an error envelope.
    Unparseable {
        /// HTTP status of the response.
        status: u16,
        /// What was missing or malformed.
        reason: String,
    },
}

/// What the client does before returning a [`PageDecision`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPlan {
    /// Time to sleep before the next request.
    pub pause: Duration,
    /// Whether the access token must be refreshed first.
    pub refresh: bool,
    /// What to request next.
    pub decision: PageDecision,
}

impl ControlPlan {
    const fn retry_after(pause: Duration) -> Self {
        Self {
            pause,
            refresh: false,
            decision: PageDecision::Retry,
        }
    }

    const fn refresh_and_retry(pause: Duration) -> Self {
        Self {
            refresh: true,
            ..Self::retry_after(pause)
        }
    }
}

/// Classifies a response.
///
/// A response is a page when both rate limit headers parse and the body
/// carries a valid `@attributes` block. A 2xx response with valid headers
/// and neither `@attributes` nor `httpCode` is an unpaginated page. Anything
/// else falls back to the error envelope, and failing that is unparseable.
#[must_use]
pub fn classify(response: &HttpResponse) -> ApiResponse {
    let bucket = BucketState::from_response(response);
    let cursor = PageCursor::from_body(&response.body);

    if let (Some(bucket), Some(cursor)) = (bucket, cursor) {
        return ApiResponse::Page {
            bucket,
            cursor: Some(cursor),
        };
    }

    if let Some(envelope) = ErrorEnvelope::from_body(&response.body) {
        return ApiResponse::ErrorEnvelope(envelope);
    }

    let has_attributes = response.body.get(ATTRIBUTES_KEY).is_some();
    match bucket {
        Some(bucket) if response.is_ok() && !has_attributes => ApiResponse::Page {
            bucket,
            cursor: None,
        },
        Some(_) => ApiResponse::Unparseable {
            status: response.code,
            reason: "malformed @attributes".to_string(),
        },
        None => ApiResponse::Unparseable {
            status: response.code,
            reason: "missing or malformed rate limit headers".to_string(),
        },
    }
}

/// Decides what to do after a classified response.
///
/// Pages pause for the bucket overflow of the *next* request (the unit cost
/// of `method`) and advance the cursor. Error envelopes and unparseable
/// responses always retry the same request after a fixed pause. An
/// expired-token envelope, or any other 401, also asks for a refresh.
#[must_use]
pub fn plan(response: &ApiResponse, method: HttpMethod, policy: &ThrottlePolicy) -> ControlPlan {
    match response {
        ApiResponse::Page { bucket, cursor } => ControlPlan {
            pause: bucket.throttle_delay(policy.unit_cost(method)),
            refresh: false,
            decision: cursor.map_or(PageDecision::Stop, |cursor| cursor.decision()),
        },
        ApiResponse::ErrorEnvelope(envelope) => match envelope.kind() {
            ErrorKind::Auth => ControlPlan::refresh_and_retry(policy.auth_retry_delay),
            ErrorKind::Throttled => ControlPlan::retry_after(policy.throttle_retry_delay),
            ErrorKind::Other => ControlPlan::retry_after(policy.error_retry_delay),
        },
        ApiResponse::Unparseable { status: 401, .. } => {
            ControlPlan::refresh_and_retry(policy.auth_retry_delay)
        }
        ApiResponse::Unparseable { .. } => ControlPlan::retry_after(policy.error_retry_delay),
    }
}
