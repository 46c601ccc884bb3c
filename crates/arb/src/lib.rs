//! Dynamic JSON documents with typed accessors and transparent remote
//! dereference.
//!
//! An [`Arb`] is a loosely-structured JSON object — string keys mapped to
//! arbitrarily typed values — for documents whose schema is not known at
//! compile time (linked-data / federation payloads, where a property may hold
//! an embedded object or a URL pointing at one).
//!
//! Two things live here:
//!
//! - a type-checked accessor surface: kind predicates that never fail and
//!   typed getters that return a [`Result`] instead of panicking, and
//! - [`Arb::find_arb`], which resolves a property to a document whether the
//!   value is an inline nested object or a URL reference to a remote one.
//!
//! # Example
//!
//! ```
//! use arb::Arb;
//!
//! let doc = Arb::read_bytes(br#"{"hello": "world", "number": 2222}"#).unwrap();
//!
//! assert_eq!(doc.get_string("hello").unwrap(), "world");
//! assert_eq!(doc.get_number("number").unwrap(), 2222.0);
//!
//! // Wrong kind is an error, not a panic.
//! assert!(doc.get_string("number").is_err());
//!
//! // Inline objects dereference without touching the network.
//! let doc = Arb::read_bytes(br#"{"ref": {"a": 1}}"#).unwrap();
//! let inner = doc.find_arb("ref").unwrap();
//! assert_eq!(inner.get_number("a").unwrap(), 1.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::io;
use std::time::Duration;
use url::Url;

mod error;
mod fetch;
mod types;

pub use error::ArbError;
pub use types::Kind;

/// A dynamic JSON document: a mapping from property names to values of any
/// of the six JSON kinds (see [`Kind`]).
///
/// Keys are unique and keep insertion order on serialization. A nested object
/// is itself an `Arb` when accessed through [`get_arb`](Arb::get_arb),
/// regardless of nesting depth — decode never produces a second, untyped map
/// representation.
///
/// The document is a plain value type: share it freely for reads, but
/// synchronize externally if several writers mutate the same instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arb(Map<String, Value>);

impl Arb {
    /// Create an empty document, typically to build an outgoing payload.
    pub fn new() -> Arb {
        Arb(Map::new())
    }

    /// Decode one JSON object from a byte stream.
    ///
    /// # Errors
    ///
    /// [`ArbError::Decode`] when the stream does not hold a well-formed JSON
    /// object (a top-level array, scalar, or malformed text all fail).
    pub fn read(reader: impl io::Read) -> Result<Arb, ArbError> {
        serde_json::from_reader(reader).map_err(ArbError::Decode)
    }

    /// Decode one JSON object from an in-memory buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use arb::Arb;
    ///
    /// let doc = Arb::read_bytes(br#"{"a": true}"#).unwrap();
    /// assert!(doc.get_bool("a").unwrap());
    ///
    /// assert!(Arb::read_bytes(b"[1, 2, 3]").is_err());
    /// ```
    pub fn read_bytes(bytes: &[u8]) -> Result<Arb, ArbError> {
        serde_json::from_slice(bytes).map_err(ArbError::Decode)
    }

    /// Serialize the document to a sink as pretty-printed JSON.
    ///
    /// Output uses two-space indentation and leaves `<`, `>`, and `&`
    /// unescaped.
    pub fn write(&self, writer: impl io::Write) -> Result<(), ArbError> {
        serde_json::to_writer_pretty(writer, &self.0).map_err(ArbError::Encode)
    }

    /// Serialize into an owned byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArbError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Serialize into an owned string.
    ///
    /// Named `to_json_string` so it does not shadow the `Display`-derived
    /// `to_string`; unlike [`fmt::Display`], this surfaces encode failures.
    pub fn to_json_string(&self) -> Result<String, ArbError> {
        serde_json::to_string_pretty(&self.0).map_err(ArbError::Encode)
    }

    /// Assign a property, returning the previous value if the key existed.
    ///
    /// An existing key keeps its position in the serialization order.
    pub fn insert(&mut self, prop: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(prop.into(), value.into())
    }

    /// Remove a property, returning its value if the key existed.
    pub fn remove(&mut self, prop: &str) -> Option<Value> {
        self.0.remove(prop)
    }

    /// Number of properties, counting explicit nulls.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw underlying value, untouched, for case-by-case inspection.
    ///
    /// `None` when the key is absent; an explicit null comes back as
    /// `Some(&Value::Null)`, unlike [`exists`](Arb::exists) which treats the
    /// two alike.
    pub fn raw(&self, prop: &str) -> Option<&Value> {
        self.0.get(prop)
    }

    /// The runtime kind of a property's value, or `None` when absent.
    pub fn kind(&self, prop: &str) -> Option<Kind> {
        self.0.get(prop).map(Kind::of)
    }

    /// True iff the key is present with a non-null value.
    ///
    /// A property explicitly set to `null` counts as absent; in linked-data
    /// payloads a null property signals deliberate omission.
    pub fn exists(&self, prop: &str) -> bool {
        !matches!(self.0.get(prop), None | Some(Value::Null))
    }

    /// True iff the property holds a boolean.
    pub fn is_bool(&self, prop: &str) -> bool {
        matches!(self.0.get(prop), Some(Value::Bool(_)))
    }

    /// True iff the property holds a number.
    pub fn is_number(&self, prop: &str) -> bool {
        matches!(self.0.get(prop), Some(Value::Number(_)))
    }

    /// True iff the property holds a string.
    pub fn is_string(&self, prop: &str) -> bool {
        matches!(self.0.get(prop), Some(Value::String(_)))
    }

    /// True iff the property holds an array.
    pub fn is_array(&self, prop: &str) -> bool {
        matches!(self.0.get(prop), Some(Value::Array(_)))
    }

    /// True iff the property holds a nested document.
    pub fn is_arb(&self, prop: &str) -> bool {
        matches!(self.0.get(prop), Some(Value::Object(_)))
    }

    /// True iff the property holds a string that parses as an absolute URL.
    ///
    /// Syntactic validation only — a `true` here says nothing about
    /// reachability.
    ///
    /// # Example
    ///
    /// ```
    /// use arb::Arb;
    ///
    /// let doc = Arb::read_bytes(
    ///     br#"{"x": "https://example.org/a", "y": "not a url but text"}"#,
    /// )
    /// .unwrap();
    /// assert!(doc.is_url("x"));
    /// assert!(!doc.is_url("y"));
    /// ```
    pub fn is_url(&self, prop: &str) -> bool {
        self.get_url(prop).is_ok()
    }

    /// Get a boolean property.
    ///
    /// # Errors
    ///
    /// [`ArbError::TypeMismatch`] when the key is absent or holds another
    /// kind. The same contract applies to every other typed getter.
    pub fn get_bool(&self, prop: &str) -> Result<bool, ArbError> {
        match self.0.get(prop) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(ArbError::mismatch(prop, Kind::Bool)),
        }
    }

    /// Get a numeric property as an `f64`.
    pub fn get_number(&self, prop: &str) -> Result<f64, ArbError> {
        match self.0.get(prop) {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| ArbError::mismatch(prop, Kind::Number)),
            _ => Err(ArbError::mismatch(prop, Kind::Number)),
        }
    }

    /// Get a string property.
    pub fn get_string(&self, prop: &str) -> Result<&str, ArbError> {
        match self.0.get(prop) {
            Some(Value::String(s)) => Ok(s),
            _ => Err(ArbError::mismatch(prop, Kind::String)),
        }
    }

    /// Get an array property as a slice of untyped values.
    pub fn get_array(&self, prop: &str) -> Result<&[Value], ArbError> {
        match self.0.get(prop) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ArbError::mismatch(prop, Kind::Array)),
        }
    }

    /// Get a nested document property.
    ///
    /// Works at any nesting depth: every decoded JSON object is the same
    /// document type.
    pub fn get_arb(&self, prop: &str) -> Result<Arb, ArbError> {
        match self.0.get(prop) {
            Some(Value::Object(map)) => Ok(Arb(map.clone())),
            _ => Err(ArbError::mismatch(prop, Kind::Arb)),
        }
    }

    /// Get an array property whose elements are all documents.
    ///
    /// Strict: the first element that is not an object fails the whole call
    /// with [`ArbError::TypeMismatch`] rather than being filtered out.
    pub fn get_arb_array(&self, prop: &str) -> Result<Vec<Arb>, ArbError> {
        let items = self.get_array(prop)?;
        let mut arbs = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(map) => arbs.push(Arb(map.clone())),
                _ => return Err(ArbError::mismatch(prop, Kind::Arb)),
            }
        }
        Ok(arbs)
    }

    /// Get a string property parsed as an absolute URL.
    ///
    /// # Errors
    ///
    /// [`ArbError::TypeMismatch`] when the value is not a string,
    /// [`ArbError::UrlParse`] when the string fails URL syntax validation.
    pub fn get_url(&self, prop: &str) -> Result<Url, ArbError> {
        let s = self.get_string(prop)?;
        Url::parse(s).map_err(|source| ArbError::UrlParse {
            prop: prop.to_string(),
            source,
        })
    }

    /// Normalize a property to an array in place.
    ///
    /// A value of any kind that is not already an array — including an absent
    /// key, which wraps as `null` — is replaced by a one-element array
    /// holding the original value. Idempotent.
    ///
    /// # Example
    ///
    /// ```
    /// use arb::Arb;
    /// use serde_json::json;
    ///
    /// let mut doc = Arb::read_bytes(br#"{"to": "alice"}"#).unwrap();
    /// doc.prop_to_array("to");
    /// assert_eq!(doc.raw("to"), Some(&json!(["alice"])));
    ///
    /// doc.prop_to_array("to"); // no-op the second time
    /// assert_eq!(doc.raw("to"), Some(&json!(["alice"])));
    /// ```
    pub fn prop_to_array(&mut self, prop: &str) {
        if self.is_array(prop) {
            return;
        }
        let original = self.0.get(prop).cloned().unwrap_or(Value::Null);
        self.0.insert(prop.to_string(), Value::Array(vec![original]));
    }

    /// Resolve the document a property refers to, inline or remote.
    ///
    /// When the value is a string holding a valid absolute URL, a single
    /// unconditional GET fetches it and the response body is decoded as a
    /// document. Otherwise the value is read as an inline nested document via
    /// [`get_arb`](Arb::get_arb).
    ///
    /// No caching: repeated calls with the same property re-fetch. The call
    /// blocks on network I/O for the remote case.
    ///
    /// # Errors
    ///
    /// - [`ArbError::TypeMismatch`] — the value is neither a URL nor an
    ///   inline document.
    /// - [`ArbError::Http`] / [`ArbError::HttpStatus`] — the request failed
    ///   or the remote answered non-2xx.
    /// - [`ArbError::Decode`] — the response body is not a JSON object.
    pub fn find_arb(&self, prop: &str) -> Result<Arb, ArbError> {
        match self.get_url(prop) {
            Ok(url) => fetch::fetch_arb(&url, None),
            Err(_) => self.get_arb(prop),
        }
    }

    /// [`find_arb`](Arb::find_arb) with a caller-supplied overall deadline on
    /// the remote fetch.
    ///
    /// The inline fallback is unaffected by the deadline.
    pub fn find_arb_timeout(&self, prop: &str, timeout: Duration) -> Result<Arb, ArbError> {
        match self.get_url(prop) {
            Ok(url) => fetch::fetch_arb(&url, Some(timeout)),
            Err(_) => self.get_arb(prop),
        }
    }
}

impl From<Map<String, Value>> for Arb {
    fn from(map: Map<String, Value>) -> Arb {
        Arb(map)
    }
}

impl From<Arb> for Value {
    fn from(arb: Arb) -> Value {
        Value::Object(arb.0)
    }
}

impl fmt::Display for Arb {
    /// Renders the same pretty JSON as [`Arb::to_json_string`]. Prefer that
    /// method when the encode error matters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string() {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("{}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Arb {
        Arb::read_bytes(
            br#"{
                "flag": true,
                "count": 42,
                "name": "alice",
                "tags": ["a", "b"],
                "nested": {"x": 1},
                "nothing": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_exists_ignores_null() {
        let doc = fixture();
        assert!(doc.exists("flag"));
        assert!(doc.exists("nested"));
        assert!(!doc.exists("nothing"));
        assert!(!doc.exists("missing"));
    }

    #[test]
    fn test_kind_predicates_mutually_exclusive() {
        let doc = fixture();
        let props = ["flag", "count", "name", "tags", "nested"];
        let checks: [(&str, fn(&Arb, &str) -> bool); 5] = [
            ("flag", Arb::is_bool),
            ("count", Arb::is_number),
            ("name", Arb::is_string),
            ("tags", Arb::is_array),
            ("nested", Arb::is_arb),
        ];
        for (expected_prop, check) in checks {
            for prop in props {
                assert_eq!(
                    check(&doc, prop),
                    prop == expected_prop,
                    "predicate for {expected_prop} against {prop}"
                );
            }
        }
    }

    #[test]
    fn test_kind_and_raw() {
        let doc = fixture();
        assert_eq!(doc.kind("count"), Some(Kind::Number));
        assert_eq!(doc.kind("nothing"), Some(Kind::Null));
        assert_eq!(doc.kind("missing"), None);

        assert_eq!(doc.raw("count"), Some(&json!(42)));
        assert_eq!(doc.raw("nothing"), Some(&Value::Null));
        assert_eq!(doc.raw("missing"), None);
    }

    #[test]
    fn test_typed_getters_happy_path() {
        let doc = fixture();
        assert!(doc.get_bool("flag").unwrap());
        assert_eq!(doc.get_number("count").unwrap(), 42.0);
        assert_eq!(doc.get_string("name").unwrap(), "alice");
        assert_eq!(
            doc.get_array("tags").unwrap(),
            [json!("a"), json!("b")].as_slice()
        );
        assert_eq!(doc.get_arb("nested").unwrap().get_number("x").unwrap(), 1.0);
    }

    #[test]
    fn test_typed_getters_mismatch_carries_prop_and_kind() {
        let doc = fixture();
        match doc.get_string("count") {
            Err(ArbError::TypeMismatch { prop, expected }) => {
                assert_eq!(prop, "count");
                assert_eq!(expected, Kind::String);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
        // Absent keys fail the same way as wrong kinds.
        assert!(matches!(
            doc.get_bool("missing"),
            Err(ArbError::TypeMismatch { .. })
        ));
        assert!(matches!(
            doc.get_arb("name"),
            Err(ArbError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_arb_array_strict() {
        let doc = Arb::read_bytes(br#"{"ok": [{"a": 1}, {"b": 2}], "mixed": [{"a": 1}, 7]}"#)
            .unwrap();
        let arbs = doc.get_arb_array("ok").unwrap();
        assert_eq!(arbs.len(), 2);
        assert_eq!(arbs[1].get_number("b").unwrap(), 2.0);

        assert!(matches!(
            doc.get_arb_array("mixed"),
            Err(ArbError::TypeMismatch { .. })
        ));
        assert!(matches!(
            doc.get_arb_array("missing"),
            Err(ArbError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_url_accessors() {
        let doc = Arb::read_bytes(
            br#"{
                "abs": "https://example.org/a",
                "junk": "not a   url",
                "rel": "still/just/text",
                "num": 5
            }"#,
        )
        .unwrap();
        assert!(doc.is_url("abs"));
        assert_eq!(doc.get_url("abs").unwrap().as_str(), "https://example.org/a");

        // Only absolute URLs pass; relative references and prose are
        // rejected at parse time.
        assert!(!doc.is_url("junk"));
        assert!(!doc.is_url("rel"));
        assert!(matches!(doc.get_url("rel"), Err(ArbError::UrlParse { .. })));

        assert!(!doc.is_url("num"));
        assert!(matches!(
            doc.get_url("num"),
            Err(ArbError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_prop_to_array_any_kind_and_idempotent() {
        let mut doc = fixture();
        doc.prop_to_array("count");
        assert_eq!(doc.raw("count"), Some(&json!([42])));
        doc.prop_to_array("count");
        assert_eq!(doc.raw("count"), Some(&json!([42])));

        doc.prop_to_array("nested");
        assert_eq!(doc.raw("nested"), Some(&json!([{"x": 1}])));

        // Absent key wraps as null.
        doc.prop_to_array("brand_new");
        assert_eq!(doc.raw("brand_new"), Some(&json!([null])));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut doc = Arb::new();
        assert!(doc.is_empty());
        assert!(doc.insert("a", 1).is_none());
        assert_eq!(doc.insert("a", "two"), Some(json!(1)));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.remove("a"), Some(json!("two")));
        assert!(doc.remove("a").is_none());
    }

    #[test]
    fn test_insert_nested_document() {
        let mut inner = Arb::new();
        inner.insert("x", 1);
        let mut doc = Arb::new();
        doc.insert("ref", inner);
        assert!(doc.is_arb("ref"));
        assert_eq!(doc.get_arb("ref").unwrap().get_number("x").unwrap(), 1.0);
    }

    #[test]
    fn test_nested_decode_is_uniform_at_depth() {
        let doc = Arb::read_bytes(br#"{"a": {"b": {"c": {"leaf": true}}}}"#).unwrap();
        let c = doc
            .get_arb("a")
            .unwrap()
            .get_arb("b")
            .unwrap()
            .get_arb("c")
            .unwrap();
        assert!(c.is_bool("leaf"));
    }
}
