//! Token-bucket rate limit handling.
//!
//! Lightspeed meters every account with a leaky bucket and reports its state
//! on each response:
//!
//! - `X-LS-API-Bucket-Level: 12.5/60`: current level and capacity
//! - `X-LS-API-Drip-Rate: 1`: units drained per second
//!
//! Every request adds a unit cost to the level. [`BucketState::throttle_delay`]
//! projects the level after the *next* request and returns how long to wait
//! so that request is not rejected.

use std::time::Duration;

use crate::clients::HttpResponse;

/// Rate limiter state reported by one response.
///
/// # Example
///
/// ```rust
/// use lightspeed_api::rest::BucketState;
///
/// let bucket = BucketState::parse("99/100", "2").unwrap();
/// let delay = bucket.throttle_delay(10.1);
/// assert!((delay.as_secs_f64() - 4.55).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketState {
    /// Units currently in the bucket.
    pub level: f64,
    /// Bucket capacity.
    pub capacity: f64,
    /// Units drained per second.
    pub drip_rate: f64,
}

impl BucketState {
    /// Parses the bucket level (`"<level>/<capacity>"`) and drip rate headers.
    ///
    /// Returns `None` if either value is malformed, if a number is not
    /// finite, if the level is negative, or if capacity or drip rate are not
    /// positive.
    #[must_use]
    pub fn parse(bucket_level: &str, drip_rate: &str) -> Option<Self> {
        let (level, capacity) = bucket_level.trim().split_once('/')?;
        let level: f64 = level.trim().parse().ok()?;
        let capacity: f64 = capacity.trim().parse().ok()?;
        let drip_rate: f64 = drip_rate.trim().parse().ok()?;

        let finite = level.is_finite() && capacity.is_finite() && drip_rate.is_finite();
        if !finite || level < 0.0 || capacity <= 0.0 || drip_rate <= 0.0 {
            return None;
        }

        Some(Self {
            level,
            capacity,
            drip_rate,
        })
    }

    /// Reads the bucket state from a response's headers.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        Self::parse(response.bucket_level()?, response.drip_rate()?)
    }

    /// Bucket level after one more request of the given cost.
    #[must_use]
    pub fn projected_level(&self, unit_cost: f64) -> f64 {
        self.level + unit_cost
    }

    /// Units still available before the bucket overflows.
    #[must_use]
    pub fn headroom(&self) -> f64 {
        (self.capacity - self.level).max(0.0)
    }

    /// Time to wait so that a request of `unit_cost` fits in the bucket.
    ///
    /// Equals `max(0, (level + unit_cost - capacity) / drip_rate)` seconds.
    /// No wait is needed while the projected level stays below capacity.
    #[must_use]
    pub fn throttle_delay(&self, unit_cost: f64) -> Duration {
        let projected = self.projected_level(unit_cost);
        if projected < self.capacity {
            return Duration::ZERO;
        }
        let seconds = (projected - self.capacity) / self.drip_rate;
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    }
}
