//! Item resource implementation.
//!
//! Items are the products a store sells. Lightspeed occasionally answers a
//! list request with a page that reports records but has no `Item` key;
//! such pages are requested again and, if they never recover, skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::resources::{Item, ItemListParams, ItemFindParams};
//!
//! let params = ItemListParams {
//!     category_id: Some("12".to_string()),
//!     load_relations: Some(vec!["ItemShops".to_string()]),
//!     ..Default::default()
//! };
//! let items = Item::all(&client, &params).await?;
//!
//! let item = Item::find(&client, "42", &ItemFindParams::default()).await?;
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::AccessTokenSource;
use crate::clients::rest::{RestClient, RestError};
use crate::rest::resource::{query_pairs, LightspeedResource, MissingCollectionPolicy};

use super::common::ArchivedFilter;

/// A product in a Lightspeed store.
///
/// Lightspeed sends numbers and booleans as strings; they are kept as
/// strings so that snapshots reproduce the server's data exactly. Relations
/// requested with `load_relations` (e.g. `ItemShops`, `Prices`) land in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Item {
    /// The unique identifier of the item.
    #[serde(rename = "itemID", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,

    #[serde(rename = "systemSku", skip_serializing_if = "Option::is_none")]
    pub system_sku: Option<String>,

    #[serde(rename = "customSku", skip_serializing_if = "Option::is_none")]
    pub custom_sku: Option<String>,

    #[serde(rename = "manufacturerSku", skip_serializing_if = "Option::is_none")]
    pub manufacturer_sku: Option<String>,

    /// The item's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "defaultCost", skip_serializing_if = "Option::is_none")]
    pub default_cost: Option<String>,

    #[serde(rename = "avgCost", skip_serializing_if = "Option::is_none")]
    pub avg_cost: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,

    /// `"true"` or `"false"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<String>,

    /// E.g. `"default"`, `"non_inventory"`, `"box"`.
    #[serde(rename = "itemType", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(rename = "categoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    #[serde(rename = "manufacturerID", skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<String>,

    #[serde(rename = "defaultVendorID", skip_serializing_if = "Option::is_none")]
    pub default_vendor_id: Option<String>,

    #[serde(rename = "itemMatrixID", skip_serializing_if = "Option::is_none")]
    pub item_matrix_id: Option<String>,

    #[serde(rename = "createTime", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,

    #[serde(rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,

    /// Fields and relations not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LightspeedResource for Item {
    const NAME: &'static str = "Item";
    const MISSING_COLLECTION: MissingCollectionPolicy = MissingCollectionPolicy::RetryPage;

    fn id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }
}

/// Filters for listing items.
///
/// `filters` takes any other Lightspeed query parameter, e.g.
/// `manufacturerID` or `timeStamp=>,2024-01-01`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ItemListParams {
    /// Relations to embed, sent as a JSON array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_relations: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<ArchivedFilter>,

    #[serde(rename = "categoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// Page size (Lightspeed caps it at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

/// Options for fetching a single item.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ItemFindParams {
    /// Relations to embed, sent as a JSON array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_relations: Option<Vec<String>>,
}

impl Item {
    /// Fetches every item matching `params`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`RestClient::fetch_all`]. Pages without an
    /// `Item` key never fail the call; they are retried and then skipped.
    pub async fn all<T: AccessTokenSource>(
        client: &RestClient<T>,
        params: &ItemListParams,
    ) -> Result<Vec<Self>, RestError> {
        let query = query_pairs(params)?;
        client.fetch_all(&query).await
    }

    /// Fetches one item by id.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingCollection`] if the response holds no
    /// item, and any error of [`RestClient::fetch_one`].
    pub async fn find<T: AccessTokenSource>(
        client: &RestClient<T>,
        id: &str,
        params: &ItemFindParams,
    ) -> Result<Self, RestError> {
        let query = query_pairs(params)?;
        client.fetch_one(id, &query).await
    }

    /// Returns `true` if Lightspeed marks the item as archived.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived.as_deref() == Some("true")
    }
}
