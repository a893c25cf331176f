//! Response record - a decoded service response with path accessors
//!
//! Accessor objects for each provider wrap a `Record` and express their
//! fields as candidate paths, e.g. a flat key first and a
//! feature-collection path second.

use serde_json::{Map, Value};

use crate::error::ParamwsError;
use crate::resolve;

/// Python-style truthiness: null, false, zero, and empty strings/lists/objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Owned response document
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    data: Value,
}

impl Default for Record {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Record {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

impl Record {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Record backed by an empty object
    pub fn empty() -> Self {
        Self {
            data: Value::Object(Map::new()),
        }
    }

    /// The whole document
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_inner(self) -> Value {
        self.data
    }

    /// Lenient lookup
    pub fn get(&self, path: &str) -> Option<&Value> {
        resolve::get(&self.data, path)
    }

    /// Lenient lookup with a default
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        resolve::get_or(&self.data, path, default)
    }

    /// Strict lookup
    pub fn require(&self, path: &str) -> Result<&Value, ParamwsError> {
        resolve::require(&self.data, path)
    }

    /// First truthy value among candidate paths
    ///
    /// Behaves like `a or b or c`: when no candidate is truthy the last
    /// candidate's value (possibly falsy, possibly absent) is returned.
    pub fn first_of<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&Value> {
        let mut last = None;
        for path in candidates {
            last = self.get(path.as_ref());
            if last.is_some_and(is_truthy) {
                return last;
            }
        }
        last
    }

    /// Insert a top-level field, turning a non-object root into an object
    pub fn add_field(&mut self, name: impl Into<String>, value: Value) {
        if !self.data.is_object() {
            tracing::debug!("replacing non-object record root before add_field");
            self.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(name.into(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy}");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("0"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy}");
        }
    }

    #[test]
    fn first_of_prefers_flat_field() {
        let record = Record::new(json!({
            "ev_mag_value": 3.1,
            "features": [{"properties": {"mag": 4.0}}]
        }));
        assert_eq!(
            record.first_of(&["ev_mag_value", "features[0].properties.mag"]),
            Some(&json!(3.1))
        );
    }

    #[test]
    fn first_of_skips_falsy_and_missing() {
        let record = Record::new(json!({
            "ev_region": "",
            "features": [{"properties": {"region": "CRETE, GREECE"}}]
        }));
        assert_eq!(
            record.first_of(&["ev_region", "features[0].properties.region"]),
            Some(&json!("CRETE, GREECE"))
        );
    }

    #[test]
    fn first_of_returns_last_candidate_when_all_falsy() {
        let record = Record::new(json!({"a": "", "b": 0}));
        assert_eq!(record.first_of(&["a", "b"]), Some(&json!(0)));
        assert_eq!(record.first_of(&["a", "missing"]), None);
        assert_eq!(record.first_of::<&str>(&[]), None);
    }

    #[test]
    fn add_field_on_empty_record() {
        let mut record = Record::empty();
        record.add_field("20201230_0000049", json!({"unid": "20201230_0000049"}));
        assert_eq!(
            record.get("20201230_0000049"),
            Some(&json!({"unid": "20201230_0000049"}))
        );
    }

    #[test]
    fn add_field_replaces_list_root() {
        let mut record = Record::new(json!([1, 2]));
        record.add_field("a", json!(1));
        assert_eq!(record.data(), &json!({"a": 1}));
    }

    #[test]
    fn require_surfaces_lookup_error() {
        let record = Record::new(json!({"a": 1}));
        assert!(matches!(record.require("b"), Err(ParamwsError::Lookup(_))));
        assert_eq!(record.require("a").unwrap(), &json!(1));
    }
}
