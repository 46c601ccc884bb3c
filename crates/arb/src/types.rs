use serde_json::Value;
use std::fmt;

/// The six runtime kinds a property's value may take.
///
/// Every value reachable through an [`Arb`](crate::Arb) is exactly one of
/// these; there is no seventh representation for nested objects at depth.
///
/// # Example
///
/// ```
/// use arb::{Arb, Kind};
///
/// let doc = Arb::read_bytes(br#"{"a": 1, "b": {"c": true}}"#).unwrap();
/// assert_eq!(doc.kind("a"), Some(Kind::Number));
/// assert_eq!(doc.kind("b"), Some(Kind::Arb));
/// assert_eq!(doc.kind("missing"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Arb,
}

impl Kind {
    /// Classify a raw JSON value.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Arb,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Arb => "document",
        };
        f.write_str(name)
    }
}
