//! Answer validation for interactive capture
//!
//! Validators check raw answer text against a quantity kind and, optionally,
//! an inclusive range. Range validators are built from hardcoded or
//! configured bounds, so a bad bound is a programming error raised when the
//! validator is built, never when an answer is checked.

use thiserror::Error;

use crate::quantity::{Quantity, QuantityError, QuantityKind, Source};

/// A user-facing reason an answer was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Value is required.")]
    Required,

    #[error("Value must be {}.", .kind.noun())]
    NotQuantity { kind: QuantityKind },

    /// Message names the concrete bound(s)
    #[error("{0}")]
    OutOfRange(String),
}

/// Invalid validator bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidatorConfigError {
    #[error("both bounds are unbounded")]
    Unbounded,

    #[error("lower bound exceeds upper bound")]
    MismatchedBounds,

    #[error("lower bound is invalid: {0}")]
    InvalidLowerBound(QuantityError),

    #[error("upper bound is invalid: {0}")]
    InvalidUpperBound(QuantityError),

    /// A bound was given but carries no value (NaN)
    #[error("{0} bound is not a number")]
    UnsetBound(&'static str),
}

/// Reject empty answers
pub fn required(answer: &str) -> Result<(), ValidationError> {
    if answer.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Parse an answer as `Q`, replacing the kind's parse error with a short
/// user-facing message
///
/// Digit runs too long for an `f64` parse to infinity, which cannot be saved,
/// so only finite answers are accepted.
pub fn validate_quantity<Q: Quantity>(answer: &str) -> Result<Q, ValidationError> {
    match Q::parse(answer) {
        Ok(quantity) if quantity.value().is_finite() => Ok(quantity),
        _ => Err(ValidationError::NotQuantity { kind: Q::KIND }),
    }
}

/// Checks that an answer is a `Q` within an inclusive range
#[derive(Debug, Clone)]
pub struct BoundedValidator<Q: Quantity> {
    lower: Q,
    upper: Q,
    out_of_range: String,
}

impl<Q: Quantity> BoundedValidator<Q> {
    /// Build a validator; `None` leaves that side unbounded
    pub fn try_new(
        lower: Option<Source<'_>>,
        upper: Option<Source<'_>>,
    ) -> Result<Self, ValidatorConfigError> {
        let lower = match lower {
            Some(source) => bound(source, "lower").map_err(|e| match e {
                BoundError::Quantity(err) => ValidatorConfigError::InvalidLowerBound(err),
                BoundError::Config(err) => err,
            })?,
            None => Q::from_value(f64::NEG_INFINITY),
        };
        let upper = match upper {
            Some(source) => bound(source, "upper").map_err(|e| match e {
                BoundError::Quantity(err) => ValidatorConfigError::InvalidUpperBound(err),
                BoundError::Config(err) => err,
            })?,
            None => Q::from_value(f64::INFINITY),
        };

        if lower > upper {
            return Err(ValidatorConfigError::MismatchedBounds);
        }
        if lower.is_neg_infinite() && upper.is_pos_infinite() {
            return Err(ValidatorConfigError::Unbounded);
        }

        let out_of_range = if upper.is_pos_infinite() {
            format!("Value must be at least {}.", lower)
        } else if lower.is_neg_infinite() {
            format!("Value must be at most {}.", upper)
        } else {
            format!("Value must be between {} and {}.", lower, upper)
        };

        Ok(Self {
            lower,
            upper,
            out_of_range,
        })
    }

    /// Build a validator from bounds the program controls, panicking on bad bounds
    pub fn new(lower: Option<Source<'_>>, upper: Option<Source<'_>>) -> Self {
        match Self::try_new(lower, upper) {
            Ok(validator) => validator,
            Err(err) => panic!("invalid {} validator: {}", Q::KIND, err),
        }
    }

    /// Validator with only a lower bound
    pub fn at_least(lower: Source<'_>) -> Self {
        Self::new(Some(lower), None)
    }

    pub fn lower(&self) -> Q {
        self.lower
    }

    pub fn upper(&self) -> Q {
        self.upper
    }

    /// Check an already-constructed quantity against the range
    pub fn check(&self, quantity: Q) -> Result<Q, ValidationError> {
        if quantity >= self.lower && quantity <= self.upper {
            Ok(quantity)
        } else {
            Err(ValidationError::OutOfRange(self.out_of_range.clone()))
        }
    }

    /// Parse and range-check an answer
    pub fn validate(&self, answer: &str) -> Result<Q, ValidationError> {
        validate_quantity::<Q>(answer).and_then(|quantity| self.check(quantity))
    }
}

enum BoundError {
    Quantity(QuantityError),
    Config(ValidatorConfigError),
}

fn bound<Q: Quantity>(source: Source<'_>, side: &'static str) -> Result<Q, BoundError> {
    let value = Q::new(source).map_err(BoundError::Quantity)?;
    if value.is_nan() {
        return Err(BoundError::Config(ValidatorConfigError::UnsetBound(side)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{Integer, Money, Number, Percentage};

    #[test]
    fn test_required() {
        assert_eq!(required(""), Err(ValidationError::Required));
        assert_eq!(required("   "), Err(ValidationError::Required));
        assert!(required("Rent").is_ok());
    }

    #[test]
    fn test_kind_messages() {
        assert_eq!(
            validate_quantity::<Integer>("1.5").unwrap_err().to_string(),
            "Value must be an integer."
        );
        assert_eq!(
            validate_quantity::<Number>("x").unwrap_err().to_string(),
            "Value must be a number."
        );
        assert_eq!(
            validate_quantity::<Money>("10.5").unwrap_err().to_string(),
            "Value must be a monetary value."
        );
        assert_eq!(
            validate_quantity::<Percentage>("6").unwrap_err().to_string(),
            "Value must be a percentage."
        );
    }

    #[test]
    fn test_overflowing_answer_rejected() {
        let answer = "9".repeat(400);
        assert_eq!(
            validate_quantity::<Money>(&answer),
            Err(ValidationError::NotQuantity {
                kind: QuantityKind::Money
            })
        );

        let validator = BoundedValidator::<Money>::at_least(Source::Float(0.01));
        assert_eq!(
            validator.validate(&answer).unwrap_err().to_string(),
            "Value must be a monetary value."
        );
        assert!(validate_quantity::<Integer>(&answer).is_err());
    }

    #[test]
    fn test_lower_bound_only() {
        let validator = BoundedValidator::<Money>::at_least(Source::Float(0.01));
        assert_eq!(validator.validate("$0.01").unwrap().value(), 0.01);
        assert_eq!(validator.validate("1,500.00").unwrap().value(), 1500.0);

        let err = validator.validate("0").unwrap_err();
        assert_eq!(err.to_string(), "Value must be at least $0.01.");
    }

    #[test]
    fn test_upper_bound_only() {
        let validator = BoundedValidator::<Integer>::new(None, Some(Source::Int(1000)));
        assert!(validator.validate("1,000").is_ok());
        assert_eq!(
            validator.validate("1,001").unwrap_err().to_string(),
            "Value must be at most 1,000."
        );
    }

    #[test]
    fn test_both_bounds() {
        let validator =
            BoundedValidator::<Percentage>::new(Some(Source::Int(0)), Some(Source::Int(100)));
        assert!(validator.validate("0%").is_ok());
        assert!(validator.validate("100%").is_ok());
        assert_eq!(
            validator.validate("150%").unwrap_err().to_string(),
            "Value must be between 0% and 100%."
        );
    }

    #[test]
    fn test_wrong_kind_reported_before_range() {
        let validator = BoundedValidator::<Number>::at_least(Source::Int(1));
        assert_eq!(
            validator.validate("lots"),
            Err(ValidationError::NotQuantity {
                kind: QuantityKind::Number
            })
        );
    }

    #[test]
    fn test_mismatched_bounds() {
        let result = BoundedValidator::<Number>::try_new(Some(Source::Int(10)), Some(Source::Int(5)));
        assert_eq!(result.unwrap_err(), ValidatorConfigError::MismatchedBounds);
    }

    #[test]
    fn test_unbounded() {
        let result = BoundedValidator::<Money>::try_new(None, None);
        assert_eq!(result.unwrap_err(), ValidatorConfigError::Unbounded);
    }

    #[test]
    fn test_invalid_bound_text() {
        let result = BoundedValidator::<Money>::try_new(Some(Source::Text("cheap")), None);
        assert!(matches!(
            result,
            Err(ValidatorConfigError::InvalidLowerBound(_))
        ));

        let result = BoundedValidator::<Money>::try_new(None, Some(Source::Text("dear")));
        assert!(matches!(
            result,
            Err(ValidatorConfigError::InvalidUpperBound(_))
        ));
    }

    #[test]
    fn test_unset_bound() {
        let result = BoundedValidator::<Money>::try_new(Some(Source::Absent), None);
        assert_eq!(result.unwrap_err(), ValidatorConfigError::UnsetBound("lower"));
    }

    #[test]
    #[should_panic(expected = "lower bound exceeds upper bound")]
    fn test_new_panics_on_bad_bounds() {
        BoundedValidator::<Integer>::new(Some(Source::Int(10)), Some(Source::Int(5)));
    }
}
