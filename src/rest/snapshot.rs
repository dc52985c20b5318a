//! JSON dumps of collected records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::clients::rest::RestError;

/// Writes `records` to `path` as pretty-printed JSON, replacing the file.
///
/// # Errors
///
/// Returns [`RestError::Io`] if the file cannot be written and
/// [`RestError::Serialize`] if `records` cannot be encoded.
///
/// # Example
///
/// ```rust,ignore
/// use lightspeed_api::rest::snapshot::write_snapshot;
/// use serde_json::json;
///
/// let items = Item::all(&client, &ItemListParams::default()).await?;
/// write_snapshot("catalog.json", &json!({ "item": items }))?;
/// ```
pub fn write_snapshot<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    records: &T,
) -> Result<(), RestError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(RestError::Serialize)?;
    writer.flush()?;

    tracing::debug!(path = %path.as_ref().display(), "Wrote snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::Item;
    use serde_json::{json, Value};

    #[test]
    fn test_snapshot_round_trips_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let item: Item = serde_json::from_value(json!({
            "itemID": "1",
            "description": "Mug",
            "ItemShops": {"ItemShop": {"qoh": "4"}}
        }))
        .unwrap();

        write_snapshot(&path, &json!({ "item": [item] })).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["item"][0]["itemID"], "1");
        assert_eq!(written["item"][0]["ItemShops"]["ItemShop"]["qoh"], "4");
    }

    #[test]
    fn test_snapshot_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("catalog.json");
        assert!(matches!(
            write_snapshot(&path, &Vec::<Item>::new()),
            Err(RestError::Io(_))
        ));
    }
}
