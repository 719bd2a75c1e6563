use crate::{
    ast::BinaryOperator,
    error::{EvalResult, EvaluationError},
    util::num::Number,
};

/// Evaluates an arithmetic operation between two values.
///
/// The operator is routed to the checked arithmetic of `N`; overflow,
/// division by zero and operations the type cannot express come back as
/// errors. Assignment carries no arithmetic and is rejected here.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// An `EvalResult<N>` containing the result of `left op right`.
///
/// # Example
/// ```
/// use exprtree::{ast::BinaryOperator, interpreter::evaluator::binary::eval_binary};
///
/// assert_eq!(eval_binary(BinaryOperator::Pow, &2i64, &10).unwrap(), 1024);
/// assert!(eval_binary(BinaryOperator::Div, &1i64, &0).is_err());
/// ```
pub fn eval_binary<N: Number>(op: BinaryOperator, left: &N, right: &N) -> EvalResult<N> {
    use BinaryOperator::{Add, Assign, Div, Mul, Pow, Sub};

    match op {
        Add => left.try_add(right),
        Sub => left.try_sub(right),
        Mul => left.try_mul(right),
        Div => left.try_div(right),
        Pow => left.try_pow(right),
        Assign => Err(EvaluationError::invalid_state("assignment has no arithmetic")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_operations() {
        assert_eq!(eval_binary(BinaryOperator::Sub, &1.5f64, &2.0).unwrap(), -0.5);
        assert_eq!(eval_binary(BinaryOperator::Pow, &2.0f64, &0.5).unwrap(),
                   2.0f64.sqrt());
    }

    #[test]
    fn assignment_is_not_arithmetic() {
        assert!(matches!(eval_binary(BinaryOperator::Assign, &1i64, &2),
                         Err(EvaluationError::InvalidState { .. })));
    }
}
