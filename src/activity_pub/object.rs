//! Read-only view over Activity Streams' core data model.

use std::borrow::Cow;
use std::fmt::Display;

use serde_json::{Map, Value};

use crate::json_ld;

/// A federated object as received, wrapped for safe access.
///
/// Accessors never panic on adversarial input: a missing property, a wrong
/// type, or a malformed nested node degrades to `None`. The wrapper borrows
/// the caller's JSON where possible and clones nothing on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object<'a>(Cow<'a, Value>);

impl Object<'_> {
    pub fn id(&self) -> Option<&str> {
        self.get_str("id").or_else(|| self.get_str("@id"))
    }
    pub fn type_is(&self, ty: &str) -> bool {
        ["type", "@type"]
            .iter()
            .any(|prop| json_ld::equals_or_includes(self.get(prop), ty))
    }
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.0.get(prop)
    }
    /// Property exists and is not JSON `null`.
    pub fn has(&self, prop: &str) -> bool {
        self.0.get(prop).is_some_and(|v| !v.is_null())
    }
    pub fn get_str(&self, prop: &str) -> Option<&str> {
        self.0.get(prop).and_then(Value::as_str)
    }
    pub fn get_bool(&self, prop: &str) -> Option<bool> {
        self.0.get(prop).and_then(Value::as_bool)
    }
    pub fn get_u64(&self, prop: &str) -> Option<u64> {
        self.0.get(prop).and_then(Value::as_u64)
    }
    pub fn get_node_object(&self, prop: &str) -> Option<Object<'_>> {
        match self.0.get(prop) {
            Some(v) if v.is_object() => Some(v.into()),
            _ => None,
        }
    }
    /// Resolve a node reference to an IRI. The reference may be a bare
    /// string, an inlined object, or (per the AS2 vocabulary) an array of
    /// them, in which case the first IRI wins.
    pub fn get_node_iri(&self, prop: &str) -> Option<&str> {
        match self.0.get(prop)? {
            Value::Array(items) => items.iter().find_map(|v| json_ld::value_or_id(Some(v))),
            other => json_ld::value_or_id(Some(other)),
        }
    }
    /// Nested `totalItems` of a collection-valued property, e.g.
    /// `likes.totalItems`.
    pub fn get_total_items(&self, prop: &str) -> Option<u64> {
        self.0.get(prop)?.get("totalItems")?.as_u64()
    }
    /// A `*Map` property holding language-tagged values, if it is a
    /// non-empty map. Key order is the document's insertion order.
    pub fn get_language_map(&self, prop: &str) -> Option<&Map<String, Value>> {
        let value = self.0.get(prop);
        if json_ld::is_language_map(value) {
            return value.and_then(Value::as_object);
        }
        None
    }
    pub fn into_owned(self) -> Object<'static> {
        Object(Cow::Owned(self.0.into_owned()))
    }
    pub fn to_value(&self) -> Value {
        self.0.clone().into_owned()
    }
}

impl From<Value> for Object<'static> {
    fn from(value: Value) -> Self {
        if !value.is_object() {
            // Upper layers should only hand us JSON objects; anything else
            // becomes an empty object so accessors degrade uniformly.
            Object(Cow::Owned(Value::Object(Map::new())))
        } else {
            Object(Cow::Owned(value))
        }
    }
}

impl<'a> From<&'a Value> for Object<'a> {
    fn from(value: &'a Value) -> Self {
        if !value.is_object() {
            Object(Cow::Owned(Value::Object(Map::new())))
        } else {
            Object(Cow::Borrowed(value))
        }
    }
}

impl From<Object<'_>> for Value {
    fn from(value: Object) -> Self {
        value.0.into_owned()
    }
}

impl AsRef<Value> for Object<'_> {
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

impl Display for Object<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
