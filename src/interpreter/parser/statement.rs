use crate::{
    ast::{BinaryOperator, Expression},
    error::{ParseError, ParseResult},
    interpreter::{
        lexer::Token,
        parser::{core::StatementParser, unary::OperandSite},
    },
    util::num::Number,
};

impl<N: Number> StatementParser<'_, '_, N> {
    /// Parses one statement, up to but not including its `;`.
    ///
    /// A statement is either an arithmetic expression or an assignment of one
    /// to a variable. `index` is the zero-based number of the statement, used
    /// when reporting evaluation failures.
    ///
    /// Grammar:
    /// ```text
    ///     statement := identifier "=" binary
    ///                | binary
    /// ```
    pub(in crate::interpreter::parser) fn parse_statement(&mut self,
                                                          index: usize)
                                                          -> ParseResult<Expression<N>> {
        let left = self.parse_binary(OperandSite::StatementStart, 1)?;

        let root = match self.peek() {
            Some((Token::Equals, position)) => {
                self.tokens.next();
                self.parse_assignment(left, position, index)?
            },
            _ => left,
        };

        self.expect_statement_end()?;
        tracing::debug!(statement = index, tree = %root, "parsed statement");
        Ok(root)
    }

    /// Parses the value of `target =` and builds the assignment.
    ///
    /// When the value can be computed right away it is evaluated and stored
    /// in the target variable.
    fn parse_assignment(&mut self,
                        target: Expression<N>,
                        position: usize,
                        index: usize)
                        -> ParseResult<Expression<N>> {
        let Some(variable) = target.as_variable().cloned() else {
            return Err(ParseError::IllegalAssignment { details: format!("'{target}' is not a variable"),
                                                       position });
        };

        let value = self.parse_binary(OperandSite::AfterOperator(BinaryOperator::Assign), 1)?;

        if let Some((Token::Equals, second)) = self.peek() {
            return Err(ParseError::MultipleAssignments { position: second });
        }
        if value.references(&variable) {
            return Err(ParseError::IllegalAssignment { details: format!("'{variable}' cannot be assigned a value that refers to itself"),
                                                       position });
        }

        let assignment = Expression::assignment(target, value)?;

        if assignment.right().is_some_and(|value| value.has_value()) {
            let value = assignment.value()
                                  .map_err(|source| ParseError::Evaluation { statement: index,
                                                                             source })?;
            tracing::debug!(statement = index,
                            variable = variable.name(),
                            value = %value,
                            "evaluated assignment");
        }

        Ok(assignment)
    }

    /// Fails unless the statement ends here.
    fn expect_statement_end(&mut self) -> ParseResult<()> {
        match self.peek() {
            None | Some((Token::Semicolon, _)) => Ok(()),
            Some((Token::Unknown(text), position)) => {
                Err(ParseError::UnknownToken { token: text.to_string(),
                                               position })
            },
            Some((Token::Equals, position)) => Err(ParseError::MultipleAssignments { position }),
            Some((token, position)) => {
                Err(ParseError::IllegalPostParsingState { token: token.to_string(),
                                                          position })
            },
        }
    }
}
