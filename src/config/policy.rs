//! Throttling and retry policy.
//!
//! This module provides [`ThrottlePolicy`], the knobs used by the
//! rate/pagination controller: the per-request unit costs charged against the
//! provider's token bucket, the fixed pauses applied after error envelopes,
//! and the retry ceiling for a single page or write.

use std::time::Duration;

use crate::clients::HttpMethod;
use crate::error::ConfigError;

/// Unit cost of a read (`GET`) request against the token bucket.
pub const READ_UNIT_COST: f64 = 1.1;

/// Unit cost of a write request against the token bucket.
pub const WRITE_UNIT_COST: f64 = 10.1;

/// Pause after an expired-token envelope, once the token was refreshed.
pub const AUTH_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Pause after a throttling or validation envelope (422/429).
pub const THROTTLE_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Pause after any other error envelope or an unparseable response.
pub const ERROR_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Consecutive retries allowed for the same page or write.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Throttling and retry settings shared by every request of a session.
///
/// The defaults mirror Lightspeed's documented cost model: reads are cheap,
/// writes cost roughly ten times as much.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use lightspeed_api::ThrottlePolicy;
/// use lightspeed_api::clients::HttpMethod;
///
/// let policy = ThrottlePolicy::default();
/// assert!((policy.unit_cost(HttpMethod::Get) - 1.1).abs() < f64::EPSILON);
/// assert!((policy.unit_cost(HttpMethod::Put) - 10.1).abs() < f64::EPSILON);
/// assert_eq!(policy.throttle_retry_delay, Duration::from_secs(10));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ThrottlePolicy {
    /// Bucket units consumed by a `GET`.
    pub read_cost: f64,
    /// Bucket units consumed by any other verb.
    pub write_cost: f64,
    /// Pause after refreshing an expired token.
    pub auth_retry_delay: Duration,
    /// Pause after a 422/429 envelope.
    pub throttle_retry_delay: Duration,
    /// Pause after any other provider error.
    pub error_retry_delay: Duration,
    /// Consecutive retries allowed before giving up on a page or write.
    pub max_retries: u32,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            read_cost: READ_UNIT_COST,
            write_cost: WRITE_UNIT_COST,
            auth_retry_delay: AUTH_RETRY_DELAY,
            throttle_retry_delay: THROTTLE_RETRY_DELAY,
            error_retry_delay: ERROR_RETRY_DELAY,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ThrottlePolicy {
    /// Returns the unit cost charged for a request with the given verb.
    #[must_use]
    pub fn unit_cost(&self, method: HttpMethod) -> f64 {
        if method.is_read() {
            self.read_cost
        } else {
            self.write_cost
        }
    }

    /// Returns a copy of this policy with all error pauses set to zero.
    ///
    /// Bucket throttling still applies; only the fixed envelope delays go away.
    #[must_use]
    pub fn without_retry_delays(mut self) -> Self {
        self.auth_retry_delay = Duration::ZERO;
        self.throttle_retry_delay = Duration::ZERO;
        self.error_retry_delay = Duration::ZERO;
        self
    }

    /// Validates that the unit costs are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThrottlePolicy`] if a cost is negative,
    /// NaN or infinite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, cost) in [("read_cost", self.read_cost), ("write_cost", self.write_cost)] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidThrottlePolicy {
                    reason: format!("{name} must be a finite, non-negative number (got {cost})"),
                });
            }
        }
        Ok(())
    }
}
