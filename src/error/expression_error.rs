/// Result type of the mutating expression operations.
pub type ExpressionResult<T> = Result<T, ExpressionError>;

/// Represents a rejected mutation of an expression tree.
///
/// The tree is always left exactly as it was before the failing call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The argument would break a structural invariant.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Which invariant was violated.
        details: String,
    },
    /// A required value was absent.
    #[error("Missing argument: {details}.")]
    NullArgument {
        /// What was missing.
        details: &'static str,
    },
}

impl ExpressionError {
    pub(crate) fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidArgument { details: details.into() }
    }
}
