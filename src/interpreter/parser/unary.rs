use crate::{
    ast::{BinaryOperator, Expression},
    error::{ParseError, ParseResult},
    interpreter::{
        lexer::{Token, token_to_binary_operator},
        parser::core::StatementParser,
    },
    util::num::Number,
};

/// Where an operand is being parsed; decides which error a missing or
/// misplaced operand produces.
#[derive(Debug, Clone, Copy)]
pub(in crate::interpreter::parser) enum OperandSite {
    /// First operand of a statement.
    StatementStart,
    /// Right operand of an operator.
    AfterOperator(BinaryOperator),
    /// First operand inside parentheses.
    AfterParen,
}

impl<N: Number> StatementParser<'_, '_, N> {
    /// Parses a unary expression.
    ///
    /// Only `-` is a prefix operator. `-x` becomes `0 - x`, where `x` extends
    /// over a following power, so `-2 ^ 2` is `0 - 2 ^ 2`. Any other operator
    /// in operand position is an error.
    ///
    /// Grammar:
    /// ```text
    ///     unary := "-" power
    ///            | primary
    /// ```
    pub(in crate::interpreter::parser) fn parse_unary(&mut self,
                                                      site: OperandSite)
                                                      -> ParseResult<Expression<N>> {
        let Some((token, position)) = self.peek() else {
            return Err(missing_operand(site, None, self.length));
        };

        match token_to_binary_operator(&token) {
            Some(BinaryOperator::Sub) => {
                self.tokens.next();
                let operand =
                    self.parse_binary(OperandSite::AfterOperator(BinaryOperator::Sub),
                                      BinaryOperator::Pow.rules().priority)?;
                Ok(Expression::subtraction(Expression::constant(N::zero()), operand)?)
            },
            Some(BinaryOperator::Assign) => match site {
                OperandSite::AfterOperator(BinaryOperator::Assign) => {
                    Err(ParseError::MultipleAssignments { position })
                },
                _ => Err(ParseError::IllegalAssignment { details: "nothing to assign to".to_string(),
                                                         position }),
            },
            Some(operator) => {
                Err(ParseError::UnsupportedUnaryOperator { operator: operator.symbol().to_string(),
                                                           position })
            },
            None => self.parse_primary(site),
        }
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := number
    ///              | identifier
    ///              | "(" binary ")"
    /// ```
    fn parse_primary(&mut self, site: OperandSite) -> ParseResult<Expression<N>> {
        let Some((token, position)) = self.tokens.next() else {
            return Err(missing_operand(site, None, self.length));
        };

        match token {
            Token::Number(literal) => {
                N::parse_literal(literal).map(Expression::constant)
                                         .ok_or_else(|| ParseError::UnknownToken { token: literal.to_string(),
                                                                                   position })
            },
            Token::Identifier(name) => Ok(Expression::variable(&self.symbols.resolve(name))),
            Token::LParen => self.parse_grouping(position),
            Token::RParen | Token::Semicolon => Err(missing_operand(site, Some(token), position)),
            Token::Unknown(text) => {
                Err(ParseError::UnknownToken { token: text.to_string(),
                                               position })
            },
            Token::Plus
            | Token::Minus
            | Token::Star
            | Token::Slash
            | Token::Caret
            | Token::Equals
            | Token::Ignored => Err(ParseError::UnsupportedUnaryOperator { operator: token.to_string(),
                                                                            position }),
        }
    }

    /// Parses a parenthesized sub-context whose `(` sits at `open`.
    fn parse_grouping(&mut self, open: usize) -> ParseResult<Expression<N>> {
        let inner = self.parse_binary(OperandSite::AfterParen, 1)?;

        match self.peek() {
            Some((Token::RParen, _)) => {
                self.tokens.next();
                Ok(inner)
            },
            None | Some((Token::Semicolon, _)) => Err(ParseError::UnfinishedSubContext { position: open }),
            Some((Token::Equals, position)) => {
                Err(ParseError::IllegalAssignment { details: "assignment inside parentheses".to_string(),
                                                    position })
            },
            Some((Token::Unknown(text), position)) => {
                Err(ParseError::UnknownToken { token: text.to_string(),
                                               position })
            },
            Some((token, position)) => {
                Err(ParseError::IllegalPostParsingState { token: token.to_string(),
                                                          position })
            },
        }
    }
}

/// Error for an operand that is absent at `position`.
fn missing_operand(site: OperandSite, found: Option<Token<'_>>, position: usize) -> ParseError {
    match site {
        OperandSite::AfterOperator(operator) => {
            ParseError::MissingRightOperand { operator: operator.symbol().to_string(),
                                              position }
        },
        OperandSite::AfterParen => ParseError::MissingRightOperand { operator: "(".to_string(),
                                                                     position },
        OperandSite::StatementStart => {
            ParseError::IllegalPostParsingState { token: found.map_or_else(|| "end of input".to_string(),
                                                                           |t| t.to_string()),
                                                  position }
        },
    }
}
