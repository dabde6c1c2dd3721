use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

/// Shared null value for index-operator misses.
pub(crate) static NULL: Value = Value::Null;

/// Compare two floats for equality with proper NaN handling.
///
/// NaN compares equal to itself so that [Value] equality stays reflexive.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Represents a value stored in a [`Collection`](crate::collection::Collection).
///
/// A value is one of: null, a scalar ([Value::Bool], [Value::I64],
/// [Value::F64], [Value::String]), or a nested ordered mapping
/// ([Value::Map]). Nested mappings recursively hold the same shape, which is
/// what dotted-path resolution walks through.
///
/// All path-walk logic pattern-matches the variant; there are no runtime type
/// tests anywhere in the crate.
///
/// Create values using the `From` trait or the [`col_value!`](crate::col_value)
/// macro:
///
/// ```rust
/// use dotmap::common::Value;
///
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let v3 = Value::from(());       // Value::Null
/// ```
///
/// Access values using the `as_*` methods, which return `Some` only when the
/// variant matches:
///
/// ```rust
/// use dotmap::common::Value;
///
/// let v = Value::from("hello");
/// assert_eq!(v.as_str(), Some("hello"));
/// assert_eq!(v.as_i64(), None);
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Represents a null value. Distinct from an absent key.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents an integer value.
    I64(i64),
    /// Represents a floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents a nested ordered mapping.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Creates a new [Value] from the given [Option]. [None] becomes
    /// [Value::Null], [Some] is converted through `Into<Value>`.
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Value {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }

    /// Checks if the [Value] is [Value::Null].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks if the [Value] is [Value::Bool].
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Checks if the [Value] is [Value::I64].
    #[inline]
    pub fn is_i64(&self) -> bool {
        matches!(self, Value::I64(_))
    }

    /// Checks if the [Value] is [Value::F64].
    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self, Value::F64(_))
    }

    /// Checks if the [Value] is a number, either integer or floating point.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::I64(_) | Value::F64(_))
    }

    /// Checks if the [Value] is [Value::String].
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Checks if the [Value] is a nested mapping.
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns the boolean value if the [Value] is [Value::Bool].
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer value if the [Value] is [Value::I64].
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the floating point value if the [Value] is [Value::F64].
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string slice if the [Value] is [Value::String].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested mapping if the [Value] is [Value::Map].
    #[inline]
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested mapping mutably if the [Value] is [Value::Map].
    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Takes the value out, leaving [Value::Null] behind.
    ///
    /// Avoids cloning when moving a value out of a collection entry.
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::String(v) => format!("\"{}\"", v),
            Value::Map(v) => {
                if v.is_empty() {
                    return "{}".to_string();
                }

                let indent_str = " ".repeat(indent + 2);
                let body = v
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}\"{}\": {}",
                            indent_str,
                            key,
                            value.to_pretty_json(indent + 2)
                        )
                    })
                    .join(",\n");
                format!("{{\n{}\n{}}}", body, " ".repeat(indent))
            }
        }
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => format!("bool({})", v),
            Value::I64(v) => format!("i64({})", v),
            Value::F64(v) => format!("f64({})", v),
            Value::String(v) => format!("string(\"{}\")", v),
            Value::Map(v) => {
                if v.is_empty() {
                    return "map({})".to_string();
                }

                let indent_str = " ".repeat(indent + 2);
                let body = v
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}\"{}\": {}",
                            indent_str,
                            key,
                            value.to_debug_string(indent + 2)
                        )
                    })
                    .join(",\n");
                format!("map({{\n{}\n{}}})", body, " ".repeat(indent))
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => num_eq_float(*a, *b),
            // cross-width numeric equality
            (Value::I64(a), Value::F64(b)) | (Value::F64(b), Value::I64(a)) => {
                num_eq_float(*a as f64, *b)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Index-operator sugar over a nested mapping value.
///
/// `value["key"]` is a top-level lookup inside a [Value::Map]; any miss, and
/// any indexing of a non-mapping value, yields [Value::Null]. This makes
/// chains like `collection["app"]["version"]` total.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Map(map) => map.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::I64(value as i64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::I64(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F64(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::from_option(value)
    }
}
