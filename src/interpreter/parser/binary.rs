use crate::{
    ast::{BinaryOperator, Expression},
    error::ParseResult,
    interpreter::{
        lexer::token_to_binary_operator,
        parser::{core::StatementParser, unary::OperandSite},
    },
    util::num::Number,
};

impl<N: Number> StatementParser<'_, '_, N> {
    /// Parses arithmetic by precedence climbing.
    ///
    /// Consumes operators whose priority is at least `min_priority`. Left
    /// associative operators parse their right operand one level tighter,
    /// right associative ones (`^`) at their own level, so `a - b - c` is
    /// `(a - b) - c` while `a ^ b ^ c` is `a ^ (b ^ c)`.
    ///
    /// `=` is never consumed here; statements deal with it.
    ///
    /// Grammar:
    /// ```text
    ///     binary := unary (op binary)*
    ///     op     := "+" | "-" | "*" | "/" | "^"
    /// ```
    pub(in crate::interpreter::parser) fn parse_binary(&mut self,
                                                       site: OperandSite,
                                                       min_priority: u8)
                                                       -> ParseResult<Expression<N>> {
        let mut left = self.parse_unary(site)?;

        while let Some((token, _)) = self.peek()
              && let Some(operator) = token_to_binary_operator(&token)
              && operator != BinaryOperator::Assign
        {
            let rules = operator.rules();
            if rules.priority < min_priority {
                break;
            }
            self.tokens.next();

            let right = self.parse_binary(OperandSite::AfterOperator(operator),
                                          rules.right_binding())?;
            left = Expression::binary(operator, Some(left), Some(right))?;
        }

        Ok(left)
    }
}
