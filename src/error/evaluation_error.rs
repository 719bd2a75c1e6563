use crate::{ast::BinaryOperator, util::num::NumberKind};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvaluationError` describing the failure.
pub type EvalResult<T> = Result<T, EvaluationError>;

/// Represents all errors that can occur while computing a value.
///
/// Both kinds are recoverable: the caller may fix the tree (fill an operand,
/// set a variable) and evaluate again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// An operand slot is empty or an operand has no value.
    #[error("Invalid state: {details}.")]
    InvalidState {
        /// What is missing.
        details: String,
    },
    /// The numeric type has no arithmetic for this operator.
    #[error("Operator '{operator}' is not supported for {kind} numbers: {details}.")]
    UnsupportedOperation {
        /// The operator being applied.
        operator: BinaryOperator,
        /// The numeric family that lacks it.
        kind:     NumberKind,
        /// Additional detail.
        details:  String,
    },
    /// Attempted division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// Arithmetic overflowed the numeric type.
    #[error("Overflow while computing '{operator}'.")]
    Overflow {
        /// The operator that overflowed.
        operator: BinaryOperator,
    },
}

impl EvaluationError {
    pub(crate) fn invalid_state(details: impl Into<String>) -> Self {
        Self::InvalidState { details: details.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_operator_and_kind() {
        let err = EvaluationError::UnsupportedOperation { operator: BinaryOperator::Pow,
                                                          kind:     NumberKind::Decimal,
                                                          details:  "no exact power".to_string(), };
        assert_eq!(err.to_string(),
                   "Operator '^' is not supported for decimal numbers: no exact power.");
        assert_eq!(EvaluationError::Overflow { operator: BinaryOperator::Mul }.to_string(),
                   "Overflow while computing '*'.");
    }
}
