//! Value tree read by the evaluator.
//!
//! The evaluator only needs a handful of operations from a parsed document,
//! captured by [`JsonNode`]. Two trees implement it: the crate's own
//! [`Value`], and `serde_json::Value` so documents parsed elsewhere can be
//! queried without conversion.

use std::fmt;

/// Runtime type tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::True | Kind::False => "boolean",
            Kind::Null => "null",
        }
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::Object | Kind::Array)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a parsed JSON node.
pub trait JsonNode: Sized {
    fn kind(&self) -> Kind;

    /// Child of an object by key; `None` for absent keys and non-objects.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Object members in document order; empty for non-objects.
    fn members(&self) -> impl Iterator<Item = (&str, &Self)>;

    /// Array elements in order; empty for non-arrays.
    fn elements(&self) -> &[Self];

    fn as_str(&self) -> Option<&str>;

    fn as_f64(&self) -> Option<f64>;

    /// Exact integer, for trees that keep integers apart from floats.
    fn as_i64(&self) -> Option<i64> {
        None
    }
}

/// A parsed JSON document.
///
/// Numbers are kept as `f64` and objects keep their keys in document order.
///
/// # Examples
///
/// ```
/// use jsonq::Value;
///
/// let doc = Value::from_json_str(r#"{"b":1,"a":[true,null]}"#).unwrap();
/// let Value::Object(members) = &doc else { panic!() };
/// assert_eq!(members[0].0, "b");
/// assert_eq!(members[1].1, Value::Array(vec![Value::Bool(true), Value::Null]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Bool(bool),

    /// Any JSON number
    Number(f64),

    /// UTF-8 string, escapes resolved
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object members in document order, keys unique
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Parses JSON text into a value tree.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl JsonNode for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(true) => Kind::True,
            Value::Bool(false) => Kind::False,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn members(&self) -> impl Iterator<Item = (&str, &Self)> {
        let members: &[(String, Value)] = match self {
            Value::Object(members) => members,
            _ => &[],
        };
        members.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn elements(&self) -> &[Self] {
        match self {
            Value::Array(arr) => arr.as_slice(),
            _ => &[],
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl JsonNode for serde_json::Value {
    fn kind(&self) -> Kind {
        match self {
            serde_json::Value::Null => Kind::Null,
            serde_json::Value::Bool(true) => Kind::True,
            serde_json::Value::Bool(false) => Kind::False,
            serde_json::Value::Number(_) => Kind::Number,
            serde_json::Value::String(_) => Kind::String,
            serde_json::Value::Array(_) => Kind::Array,
            serde_json::Value::Object(_) => Kind::Object,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn members(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.as_object()
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v))
    }

    fn elements(&self) -> &[Self] {
        self.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    fn as_str(&self) -> Option<&str> {
        serde_json::Value::as_str(self)
    }

    fn as_f64(&self) -> Option<f64> {
        serde_json::Value::as_f64(self)
    }

    fn as_i64(&self) -> Option<i64> {
        serde_json::Value::as_i64(self)
    }
}
