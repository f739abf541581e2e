//! Money type for representing currency amounts
//!
//! Amounts are plain `f64` dollars so that unknown (NaN) and unbounded
//! (infinite) amounts survive arithmetic. Accepted text forms:
//!
//! - `[sign]digits[.dd]`, e.g. `1234.50`
//! - the same with comma grouping, e.g. `1,234.50`
//! - `[sign]$digits[.dd]` and `[sign]$d,ddd[.dd]`
//!
//! Cents are optional but must be exactly two digits when present.

use std::fmt;
use std::ops::{Div, Mul};

use lazy_static::lazy_static;
use regex::Regex;

use super::format::group_digits;
use super::{invalid_format, parse_matched, Quantity, QuantityError, QuantityKind};

lazy_static! {
    static ref MONEY_PATTERN: Regex = Regex::new(r"^[+\-]?[0-9]+(?:\.[0-9]{2})?$").unwrap();
    static ref MONEY_GROUPED_PATTERN: Regex =
        Regex::new(r"^[+\-]?[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?$").unwrap();
    static ref USD_PATTERN: Regex =
        Regex::new(r"^([+\-]?)\$([0-9]+(?:\.[0-9]{2})?)$").unwrap();
    static ref USD_GROUPED_PATTERN: Regex =
        Regex::new(r"^([+\-]?)\$([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?)$").unwrap();
}

/// A human-friendly monetary amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Money(f64);

impl Money {
    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Whole dollars, truncated toward zero
    pub fn dollars(&self) -> Self {
        Self(self.0.trunc())
    }

    /// Fractional dollars, carrying the sign of the amount
    pub fn cents(&self) -> Self {
        Self(self.0.fract())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Quantity for Money {
    const KIND: QuantityKind = QuantityKind::Money;

    fn value(&self) -> f64 {
        self.0
    }

    fn from_value(value: f64) -> Self {
        Self(value)
    }

    fn unset() -> Self {
        Self(f64::NAN)
    }

    fn parse(text: &str) -> Result<Self, QuantityError> {
        if MONEY_PATTERN.is_match(text) || MONEY_GROUPED_PATTERN.is_match(text) {
            return parse_matched(Self::KIND, text, text).map(Self);
        }

        let captures = USD_PATTERN
            .captures(text)
            .or_else(|| USD_GROUPED_PATTERN.captures(text))
            .ok_or_else(|| invalid_format(Self::KIND, text))?;
        let digits = format!("{}{}", &captures[1], &captures[2]);
        parse_matched(Self::KIND, text, &digits).map(Self)
    }
}

impl_quantity_traits!(Money);

impl Mul<f64> for Money {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }
}

impl Div<f64> for Money {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self(self.0 / divisor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        let rendered = if value.is_nan() {
            "$?".to_string()
        } else if value == f64::INFINITY {
            "$∞".to_string()
        } else if value == f64::NEG_INFINITY {
            "-$∞".to_string()
        } else {
            let total_cents = (value.abs() * 100.0).round();
            let dollars = (total_cents / 100.0).trunc();
            let cents = total_cents - dollars * 100.0;
            // Amounts that round to zero never show a sign
            let sign = if value < 0.0 && total_cents > 0.0 { "-" } else { "" };
            format!(
                "{}${}.{:02}",
                sign,
                group_digits(&format!("{:.0}", dollars)),
                cents as u64
            )
        };
        f.pad(&rendered)
    }
}
