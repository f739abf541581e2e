//! Human-friendly quantities
//!
//! Four numeric wrappers share one capability: they carry an underlying `f64`
//! (which may be infinite or NaN), parse loosely formatted human text, and
//! render back to en-US style text with thousands separators.
//!
//! - [`Number`]: unrestricted real value
//! - [`Integer`]: value truncated toward zero, with ordinal rendering
//! - [`Money`]: single implied currency, `$`-prefixed rendering with cents
//! - [`Percentage`]: stored as a fraction, rendered multiplied by 100 with `%`
//!
//! Every kind is constructed through one fallible core ([`Quantity::new`]) and
//! a panicking convenience wrapper ([`Quantity::make`]) meant only for values
//! the program itself controls.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Shared operator, parsing and serde impls for the tuple-struct quantity kinds
macro_rules! impl_quantity_traits {
    ($name:ident) => {
        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                <Self as $crate::quantity::Quantity>::from_value(self.0 + other.0)
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                *self = *self + other;
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                <Self as $crate::quantity::Quantity>::from_value(self.0 - other.0)
            }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, other: Self) {
                *self = *self - other;
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, q| acc + q)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::quantity::QuantityError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::quantity::Quantity>::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::quantity::Quantity::to_stored(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                // Non-finite values are written as `null`
                let value = <Option<f64> as serde::Deserialize>::deserialize(deserializer)?;
                Ok(<Self as $crate::quantity::Quantity>::from_value(
                    value.unwrap_or(f64::NAN),
                ))
            }
        }
    };
}

mod format;
pub mod integer;
pub mod money;
pub mod number;
pub mod percentage;

pub use integer::Integer;
pub use money::Money;
pub use number::Number;
pub use percentage::Percentage;

/// The four quantity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Number,
    Integer,
    Money,
    Percentage,
}

impl QuantityKind {
    /// Short name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Money => "Money",
            Self::Percentage => "Percentage",
        }
    }

    /// The kind as a noun phrase, for user-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Money => "a monetary value",
            Self::Percentage => "a percentage",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while constructing a quantity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantityError {
    /// Text did not match the kind's grammar
    #[error("failed to parse \"{text}\" as {kind}: invalid format")]
    InvalidFormat { kind: QuantityKind, text: String },

    /// The source value has a type the kind cannot be built from
    #[error("failed to convert {found} to {kind}: invalid type")]
    InvalidType {
        kind: QuantityKind,
        found: &'static str,
    },
}

impl QuantityError {
    pub fn kind(&self) -> QuantityKind {
        match self {
            Self::InvalidFormat { kind, .. } | Self::InvalidType { kind, .. } => *kind,
        }
    }

    /// Check if this is a grammar mismatch (recoverable user input error)
    pub fn is_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Check if this is an unsupported source type (programming error)
    pub fn is_type(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }
}

/// A value a quantity can be constructed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source<'a> {
    /// No value was given
    Absent,
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl From<i64> for Source<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Source<'_> {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Source<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

/// Capability shared by every quantity kind
pub trait Quantity: Copy + PartialOrd + fmt::Display {
    const KIND: QuantityKind;

    /// The underlying real value
    fn value(&self) -> f64;

    /// Wrap an already-normalised underlying value without conversion
    fn from_value(value: f64) -> Self;

    /// The value produced from an absent source
    fn unset() -> Self;

    /// Parse text against the kind's grammar
    fn parse(text: &str) -> Result<Self, QuantityError>;

    fn from_i64(value: i64) -> Self {
        Self::from_value(value as f64)
    }

    fn from_f64(value: f64) -> Self {
        Self::from_value(value)
    }

    /// Copy another quantity through its underlying value
    fn from_quantity<Q: Quantity>(other: Q) -> Self {
        Self::from_value(other.value())
    }

    /// Construct from any supported source
    fn new(source: Source<'_>) -> Result<Self, QuantityError> {
        match source {
            Source::Absent => Ok(Self::unset()),
            Source::Int(value) => Ok(Self::from_i64(value)),
            Source::Float(value) => Ok(Self::from_f64(value)),
            Source::Text(text) => Self::parse(text),
        }
    }

    /// Construct from a trusted source, panicking on failure
    ///
    /// Only for defaults and hardcoded values, never for user input or disk data.
    fn make(source: Source<'_>) -> Self {
        match Self::new(source) {
            Ok(quantity) => quantity,
            Err(err) => panic!("{}", err),
        }
    }

    /// Construct from a loosely-typed JSON value
    ///
    /// `null` is an absent source, numbers are native sources and strings are
    /// parsed as text. Booleans, arrays and objects are rejected as
    /// [`QuantityError::InvalidType`].
    fn from_json(value: &Value) -> Result<Self, QuantityError> {
        match value {
            Value::Null => Self::new(Source::Absent),
            Value::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(int), _) => Self::new(Source::Int(int)),
                (None, Some(float)) => Self::new(Source::Float(float)),
                (None, None) => Err(type_error(Self::KIND, value)),
            },
            Value::String(text) => Self::parse(text),
            other => Err(type_error(Self::KIND, other)),
        }
    }

    /// Decode a persisted value
    ///
    /// Numbers are taken verbatim as the underlying value; `null` stands for a
    /// non-finite value that JSON cannot carry and decodes as NaN.
    fn from_stored(value: &Value) -> Result<Self, QuantityError> {
        match value {
            Value::Null => Ok(Self::from_value(f64::NAN)),
            Value::Number(number) => number
                .as_f64()
                .map(Self::from_value)
                .ok_or_else(|| type_error(Self::KIND, value)),
            other => Err(type_error(Self::KIND, other)),
        }
    }

    /// Encode for persistence
    fn to_stored(&self) -> Value {
        serde_json::Number::from_f64(self.value())
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    fn is_nan(&self) -> bool {
        self.value().is_nan()
    }

    /// Check for infinity of either sign
    fn is_infinite(&self) -> bool {
        self.value().is_infinite()
    }

    fn is_pos_infinite(&self) -> bool {
        self.value() == f64::INFINITY
    }

    fn is_neg_infinite(&self) -> bool {
        self.value() == f64::NEG_INFINITY
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(kind: QuantityKind, value: &Value) -> QuantityError {
    QuantityError::InvalidType {
        kind,
        found: json_type_name(value),
    }
}

/// Parse digits that already matched a grammar, with grouping commas removed
pub(crate) fn parse_matched(
    kind: QuantityKind,
    text: &str,
    digits: &str,
) -> Result<f64, QuantityError> {
    digits
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| QuantityError::InvalidFormat {
            kind,
            text: text.to_string(),
        })
}

pub(crate) fn invalid_format(kind: QuantityKind, text: &str) -> QuantityError {
    QuantityError::InvalidFormat {
        kind,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_sources() {
        assert_eq!(Money::from_json(&json!(12)).unwrap().value(), 12.0);
        assert_eq!(Money::from_json(&json!(12.5)).unwrap().value(), 12.5);
        assert_eq!(Money::from_json(&json!("$1,200.00")).unwrap().value(), 1200.0);
        assert!(Money::from_json(&json!(null)).unwrap().is_nan());
        assert_eq!(Number::from_json(&json!(null)).unwrap().value(), 0.0);
    }

    #[test]
    fn test_from_json_type_error() {
        let err = Integer::from_json(&json!(true)).unwrap_err();
        assert!(err.is_type());
        assert_eq!(err.kind(), QuantityKind::Integer);
        assert_eq!(err.to_string(), "failed to convert boolean to Integer: invalid type");

        assert!(Number::from_json(&json!([1, 2])).unwrap_err().is_type());
        assert!(Percentage::from_json(&json!({"rate": 1})).unwrap_err().is_type());
    }

    #[test]
    fn test_format_error_is_distinct_from_type_error() {
        let err = Number::parse("twelve").unwrap_err();
        assert!(err.is_format());
        assert!(!err.is_type());
        assert_eq!(err.to_string(), "failed to parse \"twelve\" as Number: invalid format");
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(Percentage::from_stored(&json!(0.06)).unwrap().value(), 0.06);
        assert!(Money::from_stored(&json!(null)).unwrap().is_nan());
        assert!(Money::from_stored(&json!("10.00")).unwrap_err().is_type());
    }

    #[test]
    fn test_non_finite_stored_as_null() {
        assert_eq!(Money::from_f64(f64::INFINITY).to_stored(), Value::Null);
        assert_eq!(Money::from_f64(12.5).to_stored(), json!(12.5));
    }

    #[test]
    fn test_special_value_predicates() {
        let pos = Number::from_f64(f64::INFINITY);
        let neg = Number::from_f64(f64::NEG_INFINITY);
        assert!(pos.is_infinite() && pos.is_pos_infinite() && !pos.is_neg_infinite());
        assert!(neg.is_infinite() && neg.is_neg_infinite() && !neg.is_pos_infinite());
        assert!(Number::from_f64(f64::NAN).is_nan());
        assert!(!Number::from_f64(1.0).is_infinite());
    }

    #[test]
    fn test_make_trusted_source() {
        assert_eq!(Money::make(Source::from("7.25")).value(), 7.25);
        assert_eq!(Integer::make(Source::from(3)).value(), 3.0);
    }

    #[test]
    #[should_panic(expected = "invalid format")]
    fn test_make_panics_on_bad_text() {
        Money::make(Source::from("seven"));
    }
}
