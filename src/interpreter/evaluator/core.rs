use crate::{
    ast::{BinaryOperator, Expression, ExpressionKind, Variable},
    error::{EvalResult, EvaluationError},
    interpreter::evaluator::binary::eval_binary,
    util::num::Number,
};

impl<N: Number> Expression<N> {
    /// Returns whether [`Expression::value`] has everything it needs.
    ///
    /// Constants always have a value, variables when one is stored, and
    /// binary nodes (assignment included) when both operands are present and
    /// have a value.
    #[must_use]
    pub fn has_value(&self) -> bool {
        let mut pending = vec![self.clone()];
        while let Some(node) = pending.pop() {
            match node.kind() {
                ExpressionKind::Constant(_) => {},
                ExpressionKind::Variable(variable) => {
                    if !variable.has_value() {
                        return false;
                    }
                },
                ExpressionKind::Binary(_) => {
                    let [Some(left), Some(right)] = node.operands() else {
                        return false;
                    };
                    pending.push(right);
                    pending.push(left);
                },
            }
        }
        true
    }

    /// Computes the value of this expression.
    ///
    /// Assignment stores the value of its right operand into the target
    /// variable, overwriting any previous value, and returns it. The target
    /// does not need a value beforehand.
    ///
    /// # Errors
    /// - [`EvaluationError::InvalidState`] if an operand slot is empty or an
    ///   operand has no value.
    /// - [`EvaluationError::UnsupportedOperation`],
    ///   [`EvaluationError::DivisionByZero`] or [`EvaluationError::Overflow`]
    ///   from the arithmetic of the numeric type.
    ///
    /// # Example
    /// ```
    /// use exprtree::ast::{Expression, Variable};
    ///
    /// let x = Variable::<i64>::new("x");
    /// let assignment = Expression::assignment(Expression::variable(&x),
    ///                                         Expression::constant(7)).unwrap();
    ///
    /// assert_eq!(assignment.value().unwrap(), 7);
    /// assert_eq!(x.value(), Some(7));
    /// ```
    pub fn value(&self) -> EvalResult<N> {
        let mut steps = vec![Step::Visit(self.clone())];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(node) => match node.kind() {
                    ExpressionKind::Constant(value) => values.push(value.clone()),
                    ExpressionKind::Variable(variable) => {
                        let value = variable.value().ok_or_else(|| {
                                                        EvaluationError::invalid_state(format!("variable '{variable}' has no value"))
                                                    })?;
                        values.push(value);
                    },
                    ExpressionKind::Binary(operator) => {
                        let [left, right] = node.operands();
                        let left = left.ok_or_else(|| missing_operand(operator, "left"))?;
                        let right = right.ok_or_else(|| missing_operand(operator, "right"))?;

                        if operator == BinaryOperator::Assign {
                            let target = left.as_variable().cloned().ok_or_else(|| {
                                EvaluationError::invalid_state(format!("assignment target '{left}' is not a variable"))
                            })?;
                            steps.push(Step::Store(target));
                            steps.push(Step::Visit(right));
                        } else {
                            steps.push(Step::Apply(operator));
                            steps.push(Step::Visit(right));
                            steps.push(Step::Visit(left));
                        }
                    },
                },
                Step::Apply(operator) => {
                    let right = pop_value(&mut values)?;
                    let left = pop_value(&mut values)?;
                    values.push(eval_binary(operator, &left, &right)?);
                },
                Step::Store(target) => {
                    let value = pop_value(&mut values)?;
                    tracing::trace!(variable = target.name(), value = %value, "assigning");
                    target.store(value.clone());
                    values.push(value);
                },
            }
        }

        pop_value(&mut values)
    }
}

/// Pending work of the post-order walk in [`Expression::value`].
enum Step<N> {
    Visit(Expression<N>),
    Apply(BinaryOperator),
    Store(Variable<N>),
}

fn pop_value<N>(values: &mut Vec<N>) -> EvalResult<N> {
    values.pop()
          .ok_or_else(|| EvaluationError::invalid_state("operand stack exhausted"))
}

fn missing_operand(operator: BinaryOperator, side: &str) -> EvaluationError {
    EvaluationError::invalid_state(format!("{} has no {side} operand", operator.name()))
}
