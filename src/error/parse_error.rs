use crate::error::{EvaluationError, ExpressionError};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Represents all errors that can occur while parsing a context.
///
/// Every variant aborts the whole `parse` call; no partial trees are returned.
/// Positions are byte offsets into the parsed text.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// A character or literal matched no token, or a literal is not
    /// representable by the parser's numeric type.
    #[error("Error at position {position}: Unknown token: {token}.")]
    UnknownToken {
        /// The offending source text.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// An operator other than `-` appeared where an operand was expected.
    #[error("Error at position {position}: Operator '{operator}' cannot be used as a unary operator.")]
    UnsupportedUnaryOperator {
        /// The misplaced operator.
        operator: String,
        /// Byte offset of the operator.
        position: usize,
    },
    /// An operator was not followed by an operand.
    #[error("Error at position {position}: Missing right operand for '{operator}'.")]
    MissingRightOperand {
        /// The operator (or opening parenthesis) left without an operand.
        operator: String,
        /// Byte offset where the operand was expected.
        position: usize,
    },
    /// Tokens remained after the statement was fully reduced.
    #[error("Error at position {position}: Extra tokens after expression: {token}.")]
    IllegalPostParsingState {
        /// The first leftover token.
        token:    String,
        /// Byte offset of the leftover token.
        position: usize,
    },
    /// The assignment is malformed.
    #[error("Error at position {position}: Illegal assignment: {details}.")]
    IllegalAssignment {
        /// Why the assignment was rejected.
        details:  String,
        /// Byte offset of the `=` token.
        position: usize,
    },
    /// A statement contained more than one `=`.
    #[error("Error at position {position}: Only one assignment is allowed per statement.")]
    MultipleAssignments {
        /// Byte offset of the second `=`.
        position: usize,
    },
    /// A `(` was never closed.
    #[error("Error at position {position}: Expected closing parenthesis ')' but none found.")]
    UnfinishedSubContext {
        /// Byte offset of the unmatched `(`.
        position: usize,
    },
    /// A tree-building invariant rejected the parsed structure.
    #[error(transparent)]
    Structure(#[from] ExpressionError),
    /// An assignment statement failed while being evaluated.
    #[error("Error in statement {statement}: {source}")]
    Evaluation {
        /// Zero-based index of the statement.
        statement: usize,
        /// The evaluation failure.
        #[source]
        source:    EvaluationError,
    },
}

impl ParseError {
    /// Byte offset the error points at, if it refers to a location.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::UnknownToken { position, .. }
            | Self::UnsupportedUnaryOperator { position, .. }
            | Self::MissingRightOperand { position, .. }
            | Self::IllegalPostParsingState { position, .. }
            | Self::IllegalAssignment { position, .. }
            | Self::MultipleAssignments { position }
            | Self::UnfinishedSubContext { position } => Some(*position),
            Self::Structure(_) | Self::Evaluation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_position() {
        let err = ParseError::UnknownToken { token:    "2.35".to_string(),
                                             position: 4, };
        assert_eq!(err.to_string(), "Error at position 4: Unknown token: 2.35.");
        assert_eq!(err.position(), Some(4));
    }

    #[test]
    fn evaluation_failures_have_no_position() {
        let err = ParseError::Evaluation { statement: 1,
                                           source:    EvaluationError::DivisionByZero, };
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "Error in statement 1: Division by zero.");
    }
}
