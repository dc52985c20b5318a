//! Order resource implementation.
//!
//! Orders are purchase orders sent to vendors. Related records such as the
//! order's `Note` or its `CustomFieldValues` are only included when asked
//! for with `load_relations`.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::resources::{Order, OrderListParams};
//!
//! let params = OrderListParams::with_relations(["Note", "CustomFieldValues"]);
//! let orders = Order::all(&client, &params).await?;
//! for order in &orders {
//!     if let Some(note) = order.buyer_note() {
//!         println!("{}: {note}", order.order_id.as_deref().unwrap_or("?"));
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::AccessTokenSource;
use crate::clients::rest::{RestClient, RestError};
use crate::rest::resource::{query_pairs, LightspeedResource};

use super::common::ArchivedFilter;

/// The free-text note attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrderNote {
    #[serde(rename = "noteID", skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(rename = "isPublic", skip_serializing_if = "Option::is_none")]
    pub is_public: Option<String>,

    #[serde(rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
}

/// A purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    /// The unique identifier of the order.
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// The purchase order reference number.
    #[serde(rename = "refNum", skip_serializing_if = "Option::is_none")]
    pub ref_num: Option<String>,

    #[serde(rename = "orderedDate", skip_serializing_if = "Option::is_none")]
    pub ordered_date: Option<String>,

    #[serde(rename = "receivedDate", skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,

    #[serde(rename = "arrivalDate", skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,

    #[serde(rename = "shipInstructions", skip_serializing_if = "Option::is_none")]
    pub ship_instructions: Option<String>,

    #[serde(rename = "shipCost", skip_serializing_if = "Option::is_none")]
    pub ship_cost: Option<String>,

    #[serde(rename = "otherCost", skip_serializing_if = "Option::is_none")]
    pub other_cost: Option<String>,

    /// `"true"` once the order was received in full.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<String>,

    #[serde(rename = "vendorID", skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    #[serde(rename = "shopID", skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,

    #[serde(rename = "noteID", skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,

    #[serde(rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,

    /// Present when `Note` was loaded.
    #[serde(rename = "Note", skip_serializing_if = "Option::is_none")]
    pub note: Option<OrderNote>,

    /// Present when `CustomFieldValues` was loaded.
    #[serde(rename = "CustomFieldValues", skip_serializing_if = "Option::is_none")]
    pub custom_field_values: Option<Value>,

    /// Fields and relations not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LightspeedResource for Order {
    const NAME: &'static str = "Order";

    fn id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }
}

/// Filters for listing orders.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct OrderListParams {
    /// Relations to embed, sent as a JSON array (`["Note"]`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_relations: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<ArchivedFilter>,

    /// Page size (Lightspeed caps it at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl OrderListParams {
    /// Creates parameters that load the given relations.
    #[must_use]
    pub fn with_relations<I, S>(relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            load_relations: Some(relations.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}

impl Order {
    /// Fetches every order matching `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingCollection`] if a page reports records
    /// without an `Order` key, and any error of [`RestClient::fetch_all`].
    pub async fn all<T: AccessTokenSource>(
        client: &RestClient<T>,
        params: &OrderListParams,
    ) -> Result<Vec<Self>, RestError> {
        let query = query_pairs(params)?;
        client.fetch_all(&query).await
    }

    /// Returns the buyer's name stored in the order's custom fields.
    ///
    /// Lightspeed sends a single custom field as an object and several as
    /// a list; the first value with a `name` wins.
    #[must_use]
    pub fn buyer(&self) -> Option<&str> {
        fn value_name(field: &Value) -> Option<&str> {
            field.get("value")?.get("name")?.as_str()
        }

        let field = self.custom_field_values.as_ref()?.get("CustomFieldValue")?;
        let buyer = match field {
            Value::Array(values) => values.iter().find_map(value_name),
            other => value_name(other),
        };
        buyer.filter(|buyer| !buyer.is_empty())
    }

    /// Returns the current note text, or an empty string.
    #[must_use]
    pub fn note_text(&self) -> &str {
        self.note
            .as_ref()
            .and_then(|note| note.note.as_deref())
            .unwrap_or("")
    }

    /// Builds the annotated note `"<buyer> - PO#:<ref> \n Old Note: <note>"`.
    ///
    /// Returns `None` if the buyer or reference number is missing, or if the
    /// note already carries this order's `PO#:` marker.
    #[must_use]
    pub fn buyer_note(&self) -> Option<String> {
        let buyer = self.buyer()?;
        let ref_num = self.ref_num.as_deref().filter(|r| !r.is_empty())?;
        let note = self.note_text();

        if note.contains(&format!("PO#:{ref_num}")) {
            return None;
        }

        Some(format!("{buyer} - PO#:{ref_num} \n Old Note: {note}"))
    }
}
