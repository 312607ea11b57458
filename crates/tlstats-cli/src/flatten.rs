//! Dotted-key flattening of nested records for tabular export.

use std::collections::BTreeMap;

use serde_json::Value;

/// Flatten nested objects into dotted keys (`stats.tops.G`). Arrays and
/// scalars stay as leaf values; flattening is lossless because record
/// field names never collide within a nesting level.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut flat = BTreeMap::new();
    flatten_into(value, String::new(), &mut flat);
    flat
}

fn flatten_into(value: &Value, prefix: String, flat: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, child_key, flat);
            }
        }
        other => {
            flat.insert(prefix, other.clone());
        }
    }
}

/// Render one flattened leaf as a CSV cell. Nulls become empty cells and
/// string arrays (the atomic-proposition set) join with `", "`.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(cell_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
