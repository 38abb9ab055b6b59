//! Scalar filter values and the loosely-typed field->value map.
//!
//! A `ValueMap` is what a caller hands a repository: field names mapped
//! to scalar values, typically bound from query-string parameters or a
//! JSON request body. Construction from JSON rejects anything that is
//! not an object of scalars; key validation against an entity schema
//! happens later, in `repokit-db`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::Error;

/// A single scalar filter or payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
}

impl Scalar {
    /// Short type label used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
            Scalar::Uuid(_) => "uuid",
            Scalar::DateTime(_) => "datetime",
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Scalar::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Scalar::DateTime(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as J;
        match value {
            J::Null => Ok(Scalar::Null),
            J::Bool(b) => Ok(Scalar::Bool(b)),
            J::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Scalar::Float(f))
                } else {
                    Err(Error::InvalidFilters(format!("unrepresentable number {n}")))
                }
            }
            J::String(s) => Ok(Scalar::String(s)),
            J::Array(_) => Err(Error::InvalidFilters(
                "filter values must be scalar, received an array".to_owned(),
            )),
            J::Object(_) => Err(Error::InvalidFilters(
                "filter values must be scalar, received an object".to_owned(),
            )),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Uuid(u) => u.serialize(serializer),
            Scalar::DateTime(dt) => dt.serialize(serializer),
        }
    }
}

/// Ordered field-name -> scalar map used for filters and raw payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ValueMap(BTreeMap<String, Scalar>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Scalar> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keep only the entries for which the predicate holds.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Scalar) -> bool) {
        self.0.retain(|k, v| keep(k, v));
    }
}

impl FromIterator<(String, Scalar)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Scalar);
    type IntoIter = std::collections::btree_map::IntoIter<String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFrom<serde_json::Value> for ValueMap {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(entries) = value else {
            return Err(Error::InvalidFilters(format!(
                "filters should be an object, received {}",
                json_type_name(&value)
            )));
        };
        let mut map = BTreeMap::new();
        for (key, raw) in entries {
            let scalar = Scalar::try_from(raw)
                .map_err(|e| Error::InvalidFilters(format!("field `{key}`: {e}")))?;
            map.insert(key, scalar);
        }
        Ok(Self(map))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value as J;
    match value {
        J::Null => "null",
        J::Bool(_) => "a bool",
        J::Number(_) => "a number",
        J::String(_) => "a string",
        J::Array(_) => "an array",
        J::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::{Scalar, ValueMap};
    use crate::errors::Error;

    #[test]
    fn try_from_json_object_maps_scalars() {
        // Arrange
        let json = serde_json::json!({
            "name": "boo",
            "age": 42,
            "score": 1.5,
            "active": true,
            "deleted_at": null,
        });

        // Act
        let map = ValueMap::try_from(json).unwrap();

        // Assert
        assert_eq!(map.len(), 5);
        assert_eq!(map.get("name"), Some(&Scalar::String("boo".to_owned())));
        assert_eq!(map.get("age"), Some(&Scalar::Int(42)));
        assert_eq!(map.get("score"), Some(&Scalar::Float(1.5)));
        assert_eq!(map.get("active"), Some(&Scalar::Bool(true)));
        assert_eq!(map.get("deleted_at"), Some(&Scalar::Null));
    }

    #[test]
    fn try_from_rejects_non_object_input() {
        let err = ValueMap::try_from(serde_json::json!(["boo"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFilters(_)));
    }

    #[test]
    fn try_from_rejects_nested_values() {
        let err = ValueMap::try_from(serde_json::json!({ "tags": ["a", "b"] })).unwrap_err();
        assert!(matches!(err, Error::InvalidFilters(msg) if msg.contains("tags")));
    }

    #[test]
    fn builder_inserts_converted_scalars() {
        let map = ValueMap::new().with("name", "boo").with("age", 7);
        assert_eq!(map.get("name"), Some(&Scalar::String("boo".to_owned())));
        assert_eq!(map.get("age"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn option_none_converts_to_null() {
        let map = ValueMap::new().with("deleted_at", None::<i64>);
        assert_eq!(map.get("deleted_at"), Some(&Scalar::Null));
    }

    #[test]
    fn retain_drops_rejected_entries() {
        // Arrange
        let mut map = ValueMap::new().with("keep", 1).with("drop", 2);

        // Act
        map.retain(|key, _| key == "keep");

        // Assert
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("keep"));
    }
}
