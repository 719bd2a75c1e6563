/// Parsing errors.
///
/// Defines the error taxonomy of the statement parser: unknown tokens,
/// misplaced operators, missing operands, leftover tokens, illegal or repeated
/// assignments and unterminated sub-contexts.
pub mod parse_error;
/// Structural errors.
///
/// Raised synchronously by the mutating operations of expression trees when
/// a change would break an invariant (cycles, double parents, assignment
/// shape) or when a required value is missing.
pub mod expression_error;
/// Evaluation errors.
///
/// Contains all errors that can be raised while computing the value of an
/// expression: missing operands, unsupported operator/type combinations,
/// division by zero and overflow.
pub mod evaluation_error;

pub use evaluation_error::{EvalResult, EvaluationError};
pub use expression_error::{ExpressionError, ExpressionResult};
pub use parse_error::{ParseError, ParseResult};

/// Any failure surfaced by the crate-level helpers.
///
/// Structural failures met while parsing arrive wrapped in
/// [`ParseError::Structure`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umbrella_error_is_transparent() {
        let err = Error::from(ParseError::MultipleAssignments { position: 6 });
        assert_eq!(err.to_string(),
                   "Error at position 6: Only one assignment is allowed per statement.");

        let err = Error::from(EvaluationError::DivisionByZero);
        assert_eq!(err.to_string(), "Division by zero.");
    }

    #[test]
    fn structural_failures_travel_as_parse_errors() {
        let err = Error::from(ParseError::from(ExpressionError::invalid("'x' is already part of 'x + 1'")));
        assert!(matches!(err, Error::Parse(ParseError::Structure(ExpressionError::InvalidArgument { .. }))));
        assert_eq!(err.to_string(), "Invalid argument: 'x' is already part of 'x + 1'.");
    }
}
