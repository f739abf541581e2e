//! Percentages stored as fractions
//!
//! `"6%"` is stored as `0.06`. Native numeric sources are read in percent
//! units as well, so `6` and `6.0` also become `0.06`. Values copied from
//! another quantity, or decoded from storage, are taken as the fraction itself.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::format::{group_decimal, render_signed};
use super::{invalid_format, parse_matched, Money, Quantity, QuantityError, QuantityKind};

lazy_static! {
    static ref PERCENTAGE_PATTERN: Regex =
        Regex::new(r"^([+\-]?[0-9]+(?:\.[0-9]+)?)%$").unwrap();
    static ref PERCENTAGE_GROUPED_PATTERN: Regex =
        Regex::new(r"^([+\-]?[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?)%$").unwrap();
}

/// Decimal places kept when rendering; hides binary noise from the ×100
const DISPLAY_PRECISION: usize = 10;

/// A human-friendly percentage
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Percentage {
    /// The value in percent units (`0.06` → `6`)
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Take this fraction of an amount
    pub fn of(&self, amount: Money) -> Money {
        amount * self.0
    }
}

impl Quantity for Percentage {
    const KIND: QuantityKind = QuantityKind::Percentage;

    fn value(&self) -> f64 {
        self.0
    }

    fn from_value(value: f64) -> Self {
        Self(value)
    }

    fn unset() -> Self {
        Self(f64::NAN)
    }

    fn from_i64(value: i64) -> Self {
        Self(value as f64 / 100.0)
    }

    fn from_f64(value: f64) -> Self {
        Self(value / 100.0)
    }

    fn parse(text: &str) -> Result<Self, QuantityError> {
        let captures = PERCENTAGE_PATTERN
            .captures(text)
            .or_else(|| PERCENTAGE_GROUPED_PATTERN.captures(text))
            .ok_or_else(|| invalid_format(Self::KIND, text))?;
        parse_matched(Self::KIND, text, &captures[1]).map(|percent| Self(percent / 100.0))
    }
}

impl_quantity_traits!(Percentage);

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = render_signed(self.percent(), |percent| {
            group_decimal(&format!("{:.*}", DISPLAY_PRECISION, percent))
        });
        f.pad(&format!("{}%", body))
    }
}
