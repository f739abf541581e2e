//! Plain real numbers
//!
//! Accepts `[sign]digits[.digits]`, optionally with comma-grouped digits
//! (`12,345.5`). Absent sources yield zero.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::format::{group_decimal, render_signed};
use super::{invalid_format, parse_matched, Quantity, QuantityError, QuantityKind};

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new(r"^[+\-]?[0-9]+(?:\.[0-9]+)?$").unwrap();
    static ref NUMBER_GROUPED_PATTERN: Regex =
        Regex::new(r"^[+\-]?[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?$").unwrap();
}

/// A human-friendly real number
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Number(f64);

impl Number {
    pub const fn zero() -> Self {
        Self(0.0)
    }
}

impl Quantity for Number {
    const KIND: QuantityKind = QuantityKind::Number;

    fn value(&self) -> f64 {
        self.0
    }

    fn from_value(value: f64) -> Self {
        Self(value)
    }

    fn unset() -> Self {
        Self::zero()
    }

    fn parse(text: &str) -> Result<Self, QuantityError> {
        if NUMBER_PATTERN.is_match(text) || NUMBER_GROUPED_PATTERN.is_match(text) {
            parse_matched(Self::KIND, text, text).map(Self)
        } else {
            Err(invalid_format(Self::KIND, text))
        }
    }
}

impl_quantity_traits!(Number);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&render_signed(self.0, |value| group_decimal(&value.to_string())))
    }
}
