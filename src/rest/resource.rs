//! Resource trait and response helpers.
//!
//! This module defines the [`LightspeedResource`] trait implemented by every
//! record type ([`Category`](crate::rest::resources::Category),
//! [`Item`](crate::rest::resources::Item),
//! [`Order`](crate::rest::resources::Order)). The trait only describes where
//! a resource lives and what its collection key is; the page loop itself is
//! [`RestClient::fetch_all`](crate::clients::RestClient::fetch_all).
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use lightspeed_api::rest::LightspeedResource;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Vendor {
//!     #[serde(rename = "vendorID")]
//!     pub vendor_id: Option<String>,
//!     pub name: Option<String>,
//! }
//!
//! impl LightspeedResource for Vendor {
//!     const NAME: &'static str = "Vendor";
//!
//!     fn id(&self) -> Option<&str> {
//!         self.vendor_id.as_deref()
//!     }
//! }
//!
//! let vendors: Vec<Vendor> = client.fetch_all(&[]).await?;
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::rest::RestError;
use crate::rest::pagination::PageCursor;

/// What to do with a page that reports records but lacks the collection key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingCollectionPolicy {
    /// Fail with [`RestError::MissingCollection`].
    #[default]
    Fail,
    /// Re-request the same page; once the retry budget is spent, log a
    /// warning and continue with the next page.
    RetryPage,
}

/// A Lightspeed record type with a collection endpoint.
///
/// `NAME` is used three ways: as the collection endpoint (`Item.json`), as
/// the single record endpoint (`Item/{id}.json`) and as the body key that
/// holds the records (`{"Item": [...]}`).
pub trait LightspeedResource: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// The resource name, e.g. `"Item"`.
    const NAME: &'static str;

    /// How pages without the collection key are handled.
    const MISSING_COLLECTION: MissingCollectionPolicy = MissingCollectionPolicy::Fail;

    /// Returns the record's identifier, if it has one.
    fn id(&self) -> Option<&str>;

    /// Path of the collection endpoint.
    #[must_use]
    fn collection_path() -> String {
        format!("{}.json", Self::NAME)
    }

    /// Path of a single record.
    #[must_use]
    fn record_path(id: &str) -> String {
        format!("{}/{id}.json", Self::NAME)
    }
}

/// Extracts the records stored under `key`.
///
/// Lightspeed collapses one-element collections into a bare object, so an
/// object is returned as a one-element list. A body without the key is an
/// empty collection when its `@attributes` report zero records, and `None`
/// otherwise.
#[must_use]
pub fn collection_records(body: &Value, key: &str) -> Option<Vec<Value>> {
    match body.get(key) {
        Some(Value::Array(records)) => Some(records.clone()),
        Some(record @ Value::Object(_)) => Some(vec![record.clone()]),
        Some(Value::Null) | None => PageCursor::from_body(body)
            .filter(PageCursor::is_empty)
            .map(|_| Vec::new()),
        Some(_) => None,
    }
}

/// Deserializes a list of raw records into `R`.
///
/// # Errors
///
/// Returns [`RestError::Deserialize`] for the first record that does not
/// match `R`.
pub fn decode_records<R: LightspeedResource>(values: Vec<Value>) -> Result<Vec<R>, RestError> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|source| RestError::Deserialize {
                resource: R::NAME,
                source,
            })
        })
        .collect()
}

/// Converts a parameter struct into query pairs.
///
/// `null` values are skipped, strings are passed through, and numbers and
/// booleans use their JSON text. Arrays and objects are sent as JSON text,
/// which is how Lightspeed expects `load_relations=["Note","Customer"]`.
///
/// # Errors
///
/// Returns [`RestError::Serialize`] if `params` cannot be serialized.
pub fn query_pairs<P: Serialize>(params: &P) -> Result<Vec<(String, String)>, RestError> {
    let value = serde_json::to_value(params).map_err(RestError::Serialize)?;

    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Widget {
        #[serde(rename = "widgetID")]
        widget_id: Option<String>,
    }

    impl LightspeedResource for Widget {
        const NAME: &'static str = "Widget";

        fn id(&self) -> Option<&str> {
            self.widget_id.as_deref()
        }
    }

    #[test]
    fn test_paths_use_resource_name() {
        assert_eq!(Widget::collection_path(), "Widget.json");
        assert_eq!(Widget::record_path("42"), "Widget/42.json");
        assert_eq!(Widget::MISSING_COLLECTION, MissingCollectionPolicy::Fail);
    }

    #[test]
    fn test_collection_records_accepts_array_and_single_object() {
        let many = json!({"Widget": [{"widgetID": "1"}, {"widgetID": "2"}]});
        assert_eq!(collection_records(&many, "Widget").unwrap().len(), 2);

        let one = json!({"Widget": {"widgetID": "1"}});
        assert_eq!(
            collection_records(&one, "Widget").unwrap(),
            vec![json!({"widgetID": "1"})]
        );
    }

    #[test]
    fn test_collection_records_missing_key() {
        let empty = json!({"@attributes": {"count": "0"}});
        assert_eq!(collection_records(&empty, "Widget"), Some(Vec::new()));

        let missing = json!({"@attributes": {"count": "12", "offset": "0", "limit": "100"}});
        assert!(collection_records(&missing, "Widget").is_none());

        let wrong_type = json!({"Widget": "nope"});
        assert!(collection_records(&wrong_type, "Widget").is_none());
    }

    #[test]
    fn test_decode_records_reports_resource() {
        let ok: Vec<Widget> = decode_records(vec![json!({"widgetID": "7"})]).unwrap();
        assert_eq!(ok[0].id(), Some("7"));

        let err = decode_records::<Widget>(vec![json!({"widgetID": 7})]).unwrap_err();
        assert!(matches!(
            err,
            RestError::Deserialize {
                resource: "Widget",
                ..
            }
        ));
    }

    #[test]
    fn test_query_pairs_encodes_values() {
        #[derive(Serialize)]
        struct Params {
            archived: Option<bool>,
            #[serde(rename = "categoryID")]
            category_id: Option<String>,
            limit: Option<u32>,
            load_relations: Option<Vec<String>>,
            skipped: Option<String>,
            #[serde(flatten)]
            extra: BTreeMap<String, String>,
        }

        let mut extra = BTreeMap::new();
        extra.insert("manufacturerID".to_string(), "9".to_string());

        let pairs = query_pairs(&Params {
            archived: Some(true),
            category_id: Some("12".to_string()),
            limit: Some(50),
            load_relations: Some(vec!["Note".to_string(), "Customer".to_string()]),
            skipped: None,
            extra,
        })
        .unwrap();

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("archived"), Some("true"));
        assert_eq!(get("categoryID"), Some("12"));
        assert_eq!(get("limit"), Some("50"));
        assert_eq!(get("load_relations"), Some(r#"["Note","Customer"]"#));
        assert_eq!(get("manufacturerID"), Some("9"));
        assert_eq!(get("skipped"), None);
    }

    #[test]
    fn test_query_pairs_of_unit_is_empty() {
        assert!(query_pairs(&()).unwrap().is_empty());
    }
}
