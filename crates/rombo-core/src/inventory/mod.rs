pub mod xlsx;

use crate::error::RomboError;
use crate::model::InventoryItem;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse inventory items from JSON.
///
/// Accepts a top-level array of items, an object with an `items` array, or a
/// Firestore-style export keyed by document id. In the last form the key
/// becomes the item's `id` unless the document carries its own.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<InventoryItem>, RomboError> {
    let value: Value = serde_json::from_slice(bytes)?;

    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            if let Some(items) = map.remove("items") {
                if !items.is_array() {
                    return Err(RomboError::ParseError(
                        "'items' must be an array of inventory items".into(),
                    ));
                }
                return Ok(serde_json::from_value(items)?);
            }

            let mut items = Vec::with_capacity(map.len());
            for (doc_id, doc) in map {
                if !doc.is_object() {
                    return Err(RomboError::ParseError(format!(
                        "document '{doc_id}' is not an object"
                    )));
                }
                let mut item: InventoryItem = serde_json::from_value(doc)?;
                if item.id.is_none() {
                    item.id = Some(doc_id);
                }
                items.push(item);
            }
            Ok(items)
        }
        _ => Err(RomboError::ParseError(
            "expected a JSON array or object of inventory items".into(),
        )),
    }
}

/// Load an inventory file, choosing the parser by extension (`.json` or
/// `.xlsx`).
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryItem>, RomboError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let bytes = std::fs::read(path).map_err(|e| RomboError::InventoryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let items = match extension.as_deref() {
        Some("json") => parse_json(&bytes).map_err(|e| match e {
            RomboError::Json(err) => RomboError::InventoryLoad {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
            other => other,
        })?,
        Some("xlsx") => xlsx::parse_inventory_xlsx(&bytes)?,
        _ => {
            return Err(RomboError::UnsupportedFormat(path.display().to_string()));
        }
    };

    debug!(path = %path.display(), items = items.len(), "loaded inventory");
    Ok(items)
}

/// Find an item by id, then by exact product name.
pub fn find_item<'a>(items: &'a [InventoryItem], key: &str) -> Result<&'a InventoryItem, RomboError> {
    items
        .iter()
        .find(|item| item.id.as_deref() == Some(key))
        .or_else(|| {
            items
                .iter()
                .find(|item| item.product_name.as_deref() == Some(key))
        })
        .ok_or_else(|| RomboError::ItemNotFound(key.to_string()))
}
