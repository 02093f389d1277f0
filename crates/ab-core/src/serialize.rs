//! JSON export/import of documents.
//!
//! Format:
//!
//! ```json
//! {
//!   "artboard": { "width": 800, "height": 600, "backgroundColor": "#FFFFFF" },
//!   "elements": [
//!     { "id": "image_1", "x": 100.0, "y": 100.0, "width": 200.0, "height": 150.0,
//!       "rotation": 0.0, "zIndex": 1, "type": "image", "src": "photo.png", "draggable": true }
//!   ]
//! }
//! ```
//!
//! Elements keep insertion order; optional fields are omitted when absent.

use crate::document::Document;
use crate::error::ImportError;
use crate::geometry::normalize_rotation;
use crate::model::{Artboard, Element};
use serde_json::Value;

/// Serialize a document as pretty-printed JSON.
pub fn to_json(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Parse a document from JSON. The result has passed [`Document::validate`].
pub fn from_json(text: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(ImportError::Schema("document must be a JSON object".into()));
    };

    let artboard = match root.get("artboard") {
        None | Some(Value::Null) => Artboard::default(),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| ImportError::Schema(format!("artboard: {e}")))?,
    };

    let Some(Value::Array(items)) = root.get("elements") else {
        return Err(ImportError::Schema("`elements` must be an array".into()));
    };

    let mut elements = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let mut el: Element = serde_json::from_value(item.clone())
            .map_err(|e| ImportError::Schema(format!("element {i}: {e}")))?;
        el.rotation = normalize_rotation(el.rotation);
        elements.push(el);
    }

    let doc = Document::from_parts(artboard, elements).map_err(|e| ImportError::Schema(e.to_string()))?;
    log::debug!("imported {} elements", doc.len());
    Ok(doc)
}
