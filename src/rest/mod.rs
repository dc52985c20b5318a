//! Lightspeed REST infrastructure.
//!
//! This module holds the rate/pagination controller shared by every request
//! and the resources built on top of it:
//!
//! - [`BucketState`]: the token bucket reported by each response
//! - [`PageCursor`] / [`PageDecision`]: offset/limit pagination
//! - [`ErrorEnvelope`]: Lightspeed's error bodies
//! - [`controller`]: [`classify`](controller::classify) a response, then
//!   [`plan`](controller::plan) the pause, refresh and next page
//! - [`LightspeedResource`]: the trait every record type implements
//! - [`resources`]: [`Category`](resources::Category),
//!   [`Item`](resources::Item) and [`Order`](resources::Order)
//! - [`update`]: bulk updates and the audit log
//! - [`snapshot`]: JSON dumps of collected records
//!
//! # Example
//!
//! ```rust
//! use lightspeed_api::rest::{BucketState, PageCursor, PageDecision};
//! use serde_json::json;
//!
//! let bucket = BucketState::parse("95/100", "5").unwrap();
//! assert!(bucket.throttle_delay(1.1).is_zero());
//!
//! let body = json!({"@attributes": {"count": "250", "offset": "0", "limit": "100"}});
//! assert_eq!(PageCursor::from_body(&body).unwrap().decision(), PageDecision::Next(100));
//! ```

pub mod controller;
mod envelope;
mod pagination;
mod rate_limit;
pub mod resource;
pub mod resources;
pub mod snapshot;
pub mod update;

pub use controller::{ApiResponse, ControlPlan};
pub use envelope::{ErrorEnvelope, ErrorKind};
pub use pagination::{PageCursor, PageDecision, ATTRIBUTES_KEY};
pub use rate_limit::BucketState;
pub use resource::{LightspeedResource, MissingCollectionPolicy};
