//! Attribute values and the coercion applied when they are written.
//!
//! The catalog only deals in scalar values: booleans, 64-bit integers,
//! doubles and tokens. Integer attributes accept doubles and floor them,
//! double attributes accept any IEEE-754 value including infinities.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The declared type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true` / `false`
    Bool,

    /// Signed 64-bit integer
    Int,

    /// IEEE-754 double
    Double,

    /// Interned string from a (usually closed) vocabulary
    Token,
}

impl ValueType {
    /// Name of the type as shown in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int64",
            ValueType::Double => "double",
            ValueType::Token => "token",
        }
    }

    /// Whether values of this type carry numeric limits.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Double)
    }

    /// Convert `value` into this type.
    ///
    /// Doubles written to integer attributes are floored (toward negative
    /// infinity), integers written to double attributes are widened.
    /// Everything else must already have the right type.
    pub fn coerce(self, value: Value) -> Result<Value, CoercionError> {
        match (self, value) {
            (ValueType::Bool, value @ Value::Bool(_)) => Ok(value),
            (ValueType::Int, value @ Value::Int(_)) => Ok(value),
            (ValueType::Int, Value::Double(v)) => floor_to_int(v),
            (ValueType::Double, value @ Value::Double(_)) => Ok(value),
            (ValueType::Double, Value::Int(v)) => Ok(Value::Double(v as f64)),
            (ValueType::Token, value @ Value::Token(_)) => Ok(value),
            (expected, found) => Err(CoercionError::Mismatch {
                expected,
                found: found.value_type(),
            }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn floor_to_int(value: f64) -> Result<Value, CoercionError> {
    if !value.is_finite() {
        return Err(CoercionError::NonFiniteInteger(value));
    }

    let floored = value.floor();
    // i64::MAX is not representable, its nearest double is 2^63
    if floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Err(CoercionError::IntegerOutOfRange(value));
    }

    Ok(Value::Int(floored as i64))
}

/// Reasons a value could not be converted to an attribute's type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("expected a {expected} value, got {found}")]
    Mismatch { expected: ValueType, found: ValueType },

    #[error("{0} cannot be stored in an integer attribute")]
    NonFiniteInteger(f64),

    #[error("{0} is outside the range of a 64-bit integer")]
    IntegerOutOfRange(f64),
}

/// A scalar attribute value.
///
/// Serialized externally tagged by type, e.g. `{"double": 0.9}`.
/// Non-finite doubles are written as `"inf"`, `"-inf"` or `"nan"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(#[serde(with = "non_finite")] f64),
    Token(String),
}

impl Value {
    /// The type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::Token(_) => ValueType::Token,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric view of the value, used for limit checks.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Read this value as a Rust type.
    pub fn get<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Token(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Token(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Token(value)
    }
}

/// Types that can be read back out of a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_double()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_double().map(|v| v as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_token().map(str::to_string)
    }
}

/// JSON has no literal for infinities or NaN, so those travel as strings.
mod non_finite {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid double: {}", other))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_coercion_floors() {
        assert_eq!(ValueType::Int.coerce(Value::Double(0.9)), Ok(Value::Int(0)));
        assert_eq!(ValueType::Int.coerce(Value::Double(-0.5)), Ok(Value::Int(-1)));
        assert_eq!(ValueType::Int.coerce(Value::Double(7.999)), Ok(Value::Int(7)));
        assert_eq!(ValueType::Int.coerce(Value::Int(-1)), Ok(Value::Int(-1)));
    }

    #[test]
    fn test_int_coercion_rejects_non_finite() {
        assert!(matches!(
            ValueType::Int.coerce(Value::Double(f64::NEG_INFINITY)),
            Err(CoercionError::NonFiniteInteger(_))
        ));
        assert!(matches!(
            ValueType::Int.coerce(Value::Double(1e300)),
            Err(CoercionError::IntegerOutOfRange(_))
        ));
    }

    #[test]
    fn test_double_coercion() {
        assert_eq!(ValueType::Double.coerce(Value::Int(3)), Ok(Value::Double(3.0)));
        assert_eq!(
            ValueType::Double.coerce(Value::Double(f64::NEG_INFINITY)),
            Ok(Value::Double(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn test_bool_is_strict() {
        assert_eq!(
            ValueType::Bool.coerce(Value::Int(1)),
            Err(CoercionError::Mismatch {
                expected: ValueType::Bool,
                found: ValueType::Int,
            })
        );
        assert!(ValueType::Int.coerce(Value::Bool(true)).is_err());
        assert!(ValueType::Token.coerce(Value::Double(1.0)).is_err());
    }

    #[test]
    fn test_non_finite_json() {
        let json = serde_json::to_string(&Value::Double(f64::NEG_INFINITY)).unwrap();
        assert_eq!(json, r#"{"double":"-inf"}"#);

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, Value::Double(f64::NEG_INFINITY));

        let value: Value = serde_json::from_str(r#"{"double":0.25}"#).unwrap();
        assert_eq!(value, Value::Double(0.25));

        assert!(serde_json::from_str::<Value>(r#"{"double":"lots"}"#).is_err());
    }

    #[test]
    fn test_typed_reads() {
        assert_eq!(Value::from(0.5_f64).get::<f64>(), Some(0.5));
        assert_eq!(Value::from(12).get::<i32>(), Some(12));
        assert_eq!(Value::from("none").get::<String>(), Some("none".to_string()));
        assert_eq!(Value::from(true).get::<f64>(), None);
    }
}
