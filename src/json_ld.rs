//! Just enough JSON-LD.
//!
//! ActivityStreams documents lean on JSON-LD's flexible value forms: almost
//! any property may hold a scalar, an array, or an inlined node object.
//! These helpers normalize those forms without ever failing on adversarial
//! input.

use serde_json::Value;

/// View a JSON-LD value as a slice. Absent or `null` values become an empty
/// slice, arrays are passed through, and any other value becomes a
/// one-element slice.
pub fn as_array(value: Option<&Value>) -> &[Value] {
    match value {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => std::slice::from_ref(other),
    }
}

/// Resolve a node reference that may be inlined as an object or given as a
/// bare IRI string.
pub fn value_or_id(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(iri) => Some(iri),
        Value::Object(map) => map.get("id").and_then(Value::as_str),
        _ => None,
    }
}

/// AS2 allows `type` and similar properties to hold a single string or an
/// array of strings; test membership across both forms.
pub fn equals_or_includes(value: Option<&Value>, target: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == target,
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(target)),
        _ => false,
    }
}

/// A language map is a non-empty JSON object keyed by language code.
pub fn is_language_map(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(map)) if !map.is_empty())
}
