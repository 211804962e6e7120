use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// An open-ended mapping produced by dynamic decoding.
pub type Map = BTreeMap<String, Value>;

/// This type holds dynamic VCL data.
///
/// Scalars come straight from literals in the document: integers become
/// [Int](#variant.Int), `true`/`false` become [Bool](#variant.Bool), and
/// strings, CIDR literals, percentages and bare identifiers all become
/// [String](#variant.String) holding the literal text. Lists and maps only
/// appear in the output of dynamic decoding.
#[derive(Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other value kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of an [Int](#variant.Int).
    /// Returns `0` for other value kinds.
    pub fn as_int(&self) -> i64 {
        match *self {
            Value::Int(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [String](#variant.String).
    /// Returns `""` for other value kinds.
    pub fn as_str(&self) -> &str {
        match *self {
            Value::String(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to get the items out of a [List](#variant.List).
    /// Returns an empty slice for other value kinds.
    pub fn as_list(&self) -> &[Value] {
        match *self {
            Value::List(ref values) => values.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to get the entries out of a [Map](#variant.Map).
    /// Returns `None` for other value kinds.
    pub fn as_map(&self) -> Option<&Map> {
        match *self {
            Value::Map(ref map) => Some(map),
            _ => None,
        }
    }

    /// A convenience method to extract an entry out of a [Map](#variant.Map).
    /// Returns `None` for other value kinds or if the key isn't present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match *self {
            Value::Map(ref map) => map.get(key),
            _ => None,
        }
    }

    /// A convenience method to extract the length out of a [List](#variant.List)
    /// or a [Map](#variant.Map). Returns `0` for scalars.
    pub fn len(&self) -> usize {
        match *self {
            Value::List(ref values) => values.len(),
            Value::Map(ref map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for the variants a literal can produce.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::String(_))
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// A convenience method that indexes into a [List](#variant.List). Panics
    /// for other value kinds or if the index is out of bounds.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::List(ref values) => &values[index],
            _ => panic!("index {} on a non-list value", index),
        }
    }
}

impl<'k> Index<&'k str> for Value {
    type Output = Value;

    /// A convenience method that indexes into a [Map](#variant.Map). Panics
    /// for other value kinds or if the key is missing.
    fn index(&self, key: &'k str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("missing key {:?}", key),
        }
    }
}

/// The empty string, matching an unset `String` field.
impl Default for Value {
    fn default() -> Self {
        Value::String(String::new())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::Bool(value) => value.fmt(f),
            Value::Int(value) => value.fmt(f),
            Value::String(ref value) => value.fmt(f),
            Value::List(ref values) => f.debug_list().entries(values).finish(),
            Value::Map(ref map) => f.debug_map().entries(map).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_basic() {
        assert_eq!(format!("{:?}", Value::Bool(true)), "true");
        assert_eq!(format!("{:?}", Value::Int(-3)), "-3");
        assert_eq!(format!("{:?}", Value::from("50%")), "\"50%\"");
        assert_eq!(
            format!("{:?}", Value::List(vec![Value::Int(1), Value::from("x")])),
            "[1, \"x\"]"
        );

        let mut map = Map::new();
        map.insert("b".to_owned(), Value::Int(2));
        map.insert("a".to_owned(), Value::Bool(false));
        assert_eq!(format!("{:?}", Value::Map(map)), "{\"a\": false, \"b\": 2}");
    }

    #[test]
    fn value_accessors() {
        assert!(Value::Bool(true).as_bool());
        assert!(!Value::Int(1).as_bool());
        assert_eq!(Value::Int(7).as_int(), 7);
        assert_eq!(Value::from("x").as_int(), 0);
        assert_eq!(Value::from("localhost").as_str(), "localhost");
        assert_eq!(Value::Int(1).as_str(), "");
        assert!(Value::Int(1).as_list().is_empty());
        assert!(Value::Int(1).as_map().is_none());
        assert!(Value::from("x").is_scalar());
        assert!(!Value::List(vec![]).is_scalar());
        assert_eq!(Value::default(), Value::from(""));
    }

    #[test]
    fn value_index() {
        let list = Value::List(vec![Value::from("local"), Value::from("localhost")]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], Value::from("localhost"));

        let mut inner = Map::new();
        inner.insert("hello".to_owned(), list);
        let mut outer = Map::new();
        outer.insert("acl".to_owned(), Value::Map(inner));
        let value = Value::Map(outer);

        assert_eq!(value["acl"]["hello"][0].as_str(), "local");
        assert!(value.get("backend").is_none());
    }

    #[test]
    #[should_panic(expected = "missing key")]
    fn value_index_missing_key() {
        let value = Value::Map(Map::new());
        let _ = &value["nope"];
    }

    #[test]
    fn value_serializes_untagged() {
        let mut map = Map::new();
        map.insert(".retries".to_owned(), Value::Int(3));
        map.insert(".quorum".to_owned(), Value::from("50%"));
        map.insert("hosts".to_owned(), Value::List(vec![Value::from("a"), Value::Bool(true)]));

        let json = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(json, r#"{".quorum":"50%",".retries":3,"hosts":["a",true]}"#);
    }
}
