//! Category resource implementation.
//!
//! Categories form the merchandise tree of a store. Every node carries its
//! position in the tree (`leftNode`/`rightNode`) and its full path name.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::resources::{Category, CategoryListParams};
//!
//! let categories = Category::all(&client, &CategoryListParams::default()).await?;
//! for category in &categories {
//!     println!("{}", category.full_path_name.as_deref().unwrap_or(""));
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::AccessTokenSource;
use crate::clients::rest::{RestClient, RestError};
use crate::rest::resource::{query_pairs, LightspeedResource};

use super::common::ArchivedFilter;

/// A node of the category tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Category {
    /// The unique identifier of the category.
    #[serde(rename = "categoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// The display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Depth in the tree; top-level categories are `"0"`.
    #[serde(rename = "nodeDepth", skip_serializing_if = "Option::is_none")]
    pub node_depth: Option<String>,

    /// Names of all ancestors and this node joined with `/`.
    #[serde(rename = "fullPathName", skip_serializing_if = "Option::is_none")]
    pub full_path_name: Option<String>,

    #[serde(rename = "leftNode", skip_serializing_if = "Option::is_none")]
    pub left_node: Option<String>,

    #[serde(rename = "rightNode", skip_serializing_if = "Option::is_none")]
    pub right_node: Option<String>,

    /// The parent category, `"0"` for top-level categories.
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(rename = "createTime", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,

    #[serde(rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LightspeedResource for Category {
    const NAME: &'static str = "Category";

    fn id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }
}

/// Filters for listing categories.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CategoryListParams {
    /// Page size (Lightspeed caps it at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<ArchivedFilter>,

    /// Any other query filter, e.g. `parentID`.
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl Category {
    /// Fetches every category of the account.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingCollection`] if a page reports records
    /// without a `Category` key, and any error of
    /// [`RestClient::fetch_all`].
    pub async fn all<T: AccessTokenSource>(
        client: &RestClient<T>,
        params: &CategoryListParams,
    ) -> Result<Vec<Self>, RestError> {
        let query = query_pairs(params)?;
        client.fetch_all(&query).await
    }

    /// Returns `true` for top-level categories.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.parent_id.as_deref(), None | Some("0"))
    }
}
