//! Whole numbers
//!
//! Text must be `[sign]digits`, optionally comma-grouped; fractional text is
//! rejected. Native float sources are accepted and truncated toward zero.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::format::{group_digits, render_signed};
use super::{invalid_format, parse_matched, Quantity, QuantityError, QuantityKind};

lazy_static! {
    static ref INTEGER_PATTERN: Regex = Regex::new(r"^[+\-]?[0-9]+$").unwrap();
    static ref INTEGER_GROUPED_PATTERN: Regex =
        Regex::new(r"^[+\-]?[0-9]{1,3}(?:,[0-9]{3})*$").unwrap();
}

/// A human-friendly integer
///
/// The underlying value is always integral, or one of the special values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Integer(f64);

impl Integer {
    /// Render as an ordinal word: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`
    ///
    /// Negative and non-finite values render as an empty string.
    pub fn ordinal(&self) -> String {
        // Adding zero folds -0 into 0
        let value = self.0 + 0.0;
        if !value.is_finite() || value < 0.0 {
            return String::new();
        }

        let suffix = match (value % 100.0) as u64 {
            11..=13 => "th",
            last_two => match last_two % 10 {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            },
        };
        format!("{:.0}{}", value, suffix)
    }
}

impl Quantity for Integer {
    const KIND: QuantityKind = QuantityKind::Integer;

    fn value(&self) -> f64 {
        self.0
    }

    fn from_value(value: f64) -> Self {
        Self(value.trunc())
    }

    fn unset() -> Self {
        Self(f64::NAN)
    }

    fn parse(text: &str) -> Result<Self, QuantityError> {
        if INTEGER_PATTERN.is_match(text) || INTEGER_GROUPED_PATTERN.is_match(text) {
            parse_matched(Self::KIND, text, text).map(Self::from_value)
        } else {
            Err(invalid_format(Self::KIND, text))
        }
    }

    fn to_stored(&self) -> Value {
        if self.0.is_finite() && self.0.abs() < i64::MAX as f64 {
            Value::from(self.0 as i64)
        } else {
            Value::Null
        }
    }
}

impl_quantity_traits!(Integer);

impl From<usize> for Integer {
    fn from(count: usize) -> Self {
        Self(count as f64)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&render_signed(self.0, |value| {
            group_digits(&format!("{:.0}", value))
        }))
    }
}
