//! # Lightspeed API Rust Client
//!
//! A Rust client for the Lightspeed Retail (R-Series) REST API: OAuth
//! refresh-token handling, paginated reads of categories, items and orders,
//! and bulk field updates with an audit log.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`LightspeedConfig`] and [`LightspeedConfigBuilder`]
//! - Validated newtypes for API credentials and account values
//! - Access token refresh via [`TokenManager`] and [`auth::oauth`]
//! - A rate/pagination controller that reads Lightspeed's token bucket
//!   headers, sleeps before the bucket overflows, and follows
//!   `offset`/`limit`/`count` pagination
//! - Recovery from error envelopes: expired tokens are refreshed once,
//!   throttled requests wait longer, every retry is bounded
//! - Typed [`Category`](rest::resources::Category),
//!   [`Item`](rest::resources::Item) and [`Order`](rest::resources::Order)
//!   records
//! - Bulk updates with an append-only audit log, and JSON snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use lightspeed_api::{LightspeedConfig, ClientId, ClientSecret, RefreshToken, AccountId};
//!
//! let config = LightspeedConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .refresh_token(RefreshToken::new("store-refresh-token").unwrap())
//!     .account_id(AccountId::new("12345").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Reading Collections
//!
//! ```rust,ignore
//! use lightspeed_api::{RestClient, AccessTokenSource};
//! use lightspeed_api::rest::resources::{Item, ItemListParams, Order, OrderListParams};
//!
//! let client = RestClient::new(&config)?;
//! client.tokens().refresh().await?;
//!
//! // Every page is fetched, throttled against the bucket, and collected
//! let items = Item::all(&client, &ItemListParams::default()).await?;
//!
//! let orders = Order::all(&client, &OrderListParams::with_relations(["Note", "CustomFieldValues"])).await?;
//! ```
//!
//! ## Bulk Updates
//!
//! ```rust,ignore
//! use lightspeed_api::rest::update::{update_items, AuditLog};
//! use serde_json::json;
//!
//! let mut audit = AuditLog::open("updateditems.csv")?;
//! let report = update_items(&client, &item_ids, &json!({"categoryID": "12"}), &mut audit).await?;
//! audit.finish()?;
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: page progress and throttling at
//! `debug`, error envelopes and skipped pages at `warn`. It installs no
//! subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Sequential**: One request in flight per client; pauses suspend the caller

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AccessTokenSource, Session, TokenManager};
pub use config::{
    AccountId, ApiUrl, ClientId, ClientSecret, LightspeedConfig, LightspeedConfigBuilder,
    RefreshToken, ThrottlePolicy,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RestClient, RestError,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{refresh_access_token, OAuthError};
