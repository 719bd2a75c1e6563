use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use dashu::float::DBig;
use ordered_float::OrderedFloat;

use crate::{
    ast::BinaryOperator,
    error::{EvalResult, EvaluationError},
};

/// Broad family a [`Number`] belongs to.
///
/// Used to pick the literal-parsing strategy and to describe the numeric type
/// in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Fixed-width integers; decimal-point literals are rejected.
    Integer,
    /// Binary floating-point numbers.
    Real,
    /// Arbitrary-precision decimals.
    Decimal,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}

/// A numeric type expression trees can be built over.
///
/// Every arithmetic operation is checked: failures come back as
/// [`EvaluationError`] instead of panicking or silently wrapping. Types that
/// have no sensible definition for an operator report
/// [`EvaluationError::UnsupportedOperation`].
///
/// `literal_eq` and `hash_literal` must agree: two literals that compare equal
/// hash identically.
pub trait Number: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// The family of this numeric type.
    const KIND: NumberKind;

    /// Converts a numeric literal as written in source text.
    ///
    /// Returns `None` if the literal is not representable, e.g. `2.35` for an
    /// integer type.
    fn parse_literal(literal: &str) -> Option<Self>;

    /// The additive identity. Unary minus is expressed as `0 - x`.
    fn zero() -> Self;

    fn try_add(&self, rhs: &Self) -> EvalResult<Self>;
    fn try_sub(&self, rhs: &Self) -> EvalResult<Self>;
    fn try_mul(&self, rhs: &Self) -> EvalResult<Self>;
    fn try_div(&self, rhs: &Self) -> EvalResult<Self>;
    fn try_pow(&self, exponent: &Self) -> EvalResult<Self>;

    /// Literal equality used by structural expression equality.
    ///
    /// Equal literals must display alike.
    fn literal_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Feeds the literal into `state`, consistently with [`Number::literal_eq`].
    fn hash_literal<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_integer_number {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                const KIND: NumberKind = NumberKind::Integer;

                fn parse_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }

                fn zero() -> Self {
                    0
                }

                fn try_add(&self, rhs: &Self) -> EvalResult<Self> {
                    self.checked_add(*rhs)
                        .ok_or(EvaluationError::Overflow { operator: BinaryOperator::Add })
                }

                fn try_sub(&self, rhs: &Self) -> EvalResult<Self> {
                    self.checked_sub(*rhs)
                        .ok_or(EvaluationError::Overflow { operator: BinaryOperator::Sub })
                }

                fn try_mul(&self, rhs: &Self) -> EvalResult<Self> {
                    self.checked_mul(*rhs)
                        .ok_or(EvaluationError::Overflow { operator: BinaryOperator::Mul })
                }

                fn try_div(&self, rhs: &Self) -> EvalResult<Self> {
                    if *rhs == 0 {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    self.checked_div(*rhs)
                        .ok_or(EvaluationError::Overflow { operator: BinaryOperator::Div })
                }

                fn try_pow(&self, exponent: &Self) -> EvalResult<Self> {
                    if *exponent < 0 {
                        return Err(EvaluationError::UnsupportedOperation {
                            operator: BinaryOperator::Pow,
                            kind:     Self::KIND,
                            details:  format!("negative exponent {exponent}"),
                        });
                    }
                    let exponent = u32::try_from(*exponent)
                        .map_err(|_| EvaluationError::Overflow { operator: BinaryOperator::Pow })?;
                    self.checked_pow(exponent)
                        .ok_or(EvaluationError::Overflow { operator: BinaryOperator::Pow })
                }

                fn hash_literal<H: Hasher>(&self, state: &mut H) {
                    self.hash(state);
                }
            }
        )*
    };
}

macro_rules! impl_real_number {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                const KIND: NumberKind = NumberKind::Real;

                fn parse_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }

                fn zero() -> Self {
                    0.0
                }

                fn try_add(&self, rhs: &Self) -> EvalResult<Self> {
                    Ok(self + rhs)
                }

                fn try_sub(&self, rhs: &Self) -> EvalResult<Self> {
                    Ok(self - rhs)
                }

                fn try_mul(&self, rhs: &Self) -> EvalResult<Self> {
                    Ok(self * rhs)
                }

                fn try_div(&self, rhs: &Self) -> EvalResult<Self> {
                    if *rhs == 0.0 {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    Ok(self / rhs)
                }

                fn try_pow(&self, exponent: &Self) -> EvalResult<Self> {
                    Ok(self.powf(*exponent))
                }

                // `0.0` and `-0.0` display differently, so they are distinct literals.
                fn literal_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                    && (self.is_nan() || self.is_sign_negative() == other.is_sign_negative())
                }

                fn hash_literal<H: Hasher>(&self, state: &mut H) {
                    OrderedFloat(*self).hash(state);
                }
            }
        )*
    };
}

impl_integer_number!(i32, i64);
impl_real_number!(f32, f64);

/// Arbitrary-precision decimals.
///
/// There is no native power operation that keeps the result exact, so `^`
/// is reported as unsupported rather than approximated.
impl Number for DBig {
    const KIND: NumberKind = NumberKind::Decimal;

    fn parse_literal(literal: &str) -> Option<Self> {
        Self::from_str(literal).ok()
    }

    fn zero() -> Self {
        Self::ZERO
    }

    fn try_add(&self, rhs: &Self) -> EvalResult<Self> {
        Ok(self + rhs)
    }

    fn try_sub(&self, rhs: &Self) -> EvalResult<Self> {
        Ok(self - rhs)
    }

    fn try_mul(&self, rhs: &Self) -> EvalResult<Self> {
        Ok(self * rhs)
    }

    fn try_div(&self, rhs: &Self) -> EvalResult<Self> {
        if *rhs == Self::ZERO {
            return Err(EvaluationError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn try_pow(&self, _exponent: &Self) -> EvalResult<Self> {
        Err(EvaluationError::UnsupportedOperation { operator: BinaryOperator::Pow,
                                                    kind:     Self::KIND,
                                                    details:  "no exact power for decimals".to_string(), })
    }

    fn hash_literal<H: Hasher>(&self, state: &mut H) {
        let repr = self.repr();
        repr.significand().hash(state);
        repr.exponent().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn literal_hash<N: Number>(n: &N) -> u64 {
        let mut hasher = DefaultHasher::new();
        n.hash_literal(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn integer_literals_reject_decimal_points() {
        assert_eq!(i64::parse_literal("42"), Some(42));
        assert_eq!(i64::parse_literal("2.35"), None);
        assert_eq!(i32::parse_literal("1e3"), None);
        assert_eq!(f64::parse_literal("2.35"), Some(2.35));
    }

    #[test]
    fn integer_arithmetic_is_checked() {
        assert!(matches!(i64::MAX.try_add(&1), Err(EvaluationError::Overflow { .. })));
        assert!(matches!(5i64.try_div(&0), Err(EvaluationError::DivisionByZero)));
        assert!(matches!(i64::MIN.try_div(&-1), Err(EvaluationError::Overflow { .. })));
        assert_eq!(4i64.try_div(&3).unwrap(), 1);
        assert_eq!(2i64.try_pow(&10).unwrap(), 1024);
        assert!(matches!(2i64.try_pow(&-1),
                         Err(EvaluationError::UnsupportedOperation { .. })));
    }

    #[test]
    fn signed_real_zeros_are_distinct_literals() {
        assert!(!0.0f64.literal_eq(&-0.0));
        assert!(!(-0.0f32).literal_eq(&0.0));
        assert!((-0.0f64).literal_eq(&-0.0));
        assert!(f64::NAN.literal_eq(&-f64::NAN));
        assert_eq!(literal_hash(&1.5f64), literal_hash(&1.5f64));
        assert!(matches!(1.0f64.try_div(&0.0), Err(EvaluationError::DivisionByZero)));
    }

    #[test]
    fn decimal_power_is_unsupported() {
        let five = DBig::parse_literal("5").unwrap();
        let three = DBig::parse_literal("3").unwrap();
        assert!(matches!(five.try_pow(&three),
                         Err(EvaluationError::UnsupportedOperation { kind: NumberKind::Decimal,
                                                                     .. })));
        assert_eq!(five.try_add(&three).unwrap(), DBig::parse_literal("8").unwrap());
    }
}
