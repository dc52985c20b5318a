//! Lightspeed Retail resources.
//!
//! Each resource is a typed record plus list parameters:
//!
//! - [`Category`] / [`CategoryListParams`]: the category tree
//! - [`Item`] / [`ItemListParams`] / [`ItemFindParams`]: products
//! - [`Order`] / [`OrderListParams`]: purchase orders and their notes
//!
//! Known fields are typed; everything else is kept in each record's `extra`
//! map, so a record serializes back to the JSON it was read from.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::resources::{Category, CategoryListParams, Item, ItemListParams};
//!
//! let categories = Category::all(&client, &CategoryListParams::default()).await?;
//! let items = Item::all(&client, &ItemListParams::default()).await?;
//! ```

mod category;
mod common;
mod item;
mod order;

pub use category::{Category, CategoryListParams};
pub use common::ArchivedFilter;
pub use item::{Item, ItemFindParams, ItemListParams};
pub use order::{Order, OrderListParams, OrderNote};
