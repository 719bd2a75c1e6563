use std::{iter::Peekable, marker::PhantomData};

use crate::{
    ast::Expression,
    error::ParseResult,
    interpreter::{
        lexer::{Token, Tokenizer},
        symbols::SymbolTable,
    },
    util::num::Number,
};

/// Parses semicolon-separated statements into expression trees over `N`.
///
/// The numeric type decides how literals are read: an integer parser rejects
/// `2.35`, a real or decimal parser accepts it. A `Parser` holds no state
/// between calls; every [`Parser::parse`] call gets its own symbol table.
///
/// # Example
/// ```
/// use exprtree::interpreter::parser::Parser;
///
/// let parser = Parser::<i64>::new();
/// let statements = parser.parse("r = 2; pi = 3; c = 4/3; c * pi * r ^3").unwrap();
///
/// assert_eq!(statements.len(), 4);
/// assert_eq!(statements[3].value().unwrap(), 24);
/// ```
pub struct Parser<N> {
    numbers: PhantomData<fn() -> N>,
}

impl<N: Number> Parser<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { numbers: PhantomData }
    }

    /// Creates a parser for the type of `specimen`.
    ///
    /// Only the type of the specimen matters; its value is ignored.
    ///
    /// # Example
    /// ```
    /// use exprtree::interpreter::parser::Parser;
    ///
    /// let parser = Parser::from_specimen(&0.0f64);
    /// let statements = parser.parse("a = 2.35; a * 2").unwrap();
    /// assert_eq!(statements[1].value().unwrap(), 4.7);
    /// ```
    #[must_use]
    pub const fn from_specimen(_specimen: &N) -> Self {
        Self::new()
    }

    /// Parses every statement of `context`.
    ///
    /// Statements are separated by `;`; empty statements are skipped. An
    /// assignment whose value can already be computed is evaluated while its
    /// statement is built, so later statements see the assigned value.
    ///
    /// # Errors
    /// Returns the first [`crate::error::ParseError`] encountered. No trees
    /// are returned in that case.
    #[tracing::instrument(level = "debug", skip(self), fields(kind = %N::KIND))]
    pub fn parse(&self, context: &str) -> ParseResult<Vec<Expression<N>>> {
        let mut symbols = SymbolTable::new();
        let statements = StatementParser::new(context, &mut symbols).parse_all()?;
        tracing::debug!(statements = statements.len(),
                        symbols = symbols.len(),
                        "parsed context");
        Ok(statements)
    }
}

impl<N: Number> Default for Parser<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsing state of one `parse` call.
pub(in crate::interpreter::parser) struct StatementParser<'src, 'sym, N> {
    pub(in crate::interpreter::parser) tokens:  Peekable<Tokenizer<'src>>,
    pub(in crate::interpreter::parser) symbols: &'sym mut SymbolTable<N>,
    /// Byte length of the source, reported as the position of end of input.
    pub(in crate::interpreter::parser) length:  usize,
}

impl<'src, 'sym, N: Number> StatementParser<'src, 'sym, N> {
    fn new(source: &'src str, symbols: &'sym mut SymbolTable<N>) -> Self {
        Self { tokens: Tokenizer::new(source).peekable(),
               symbols,
               length: source.len() }
    }

    fn parse_all(mut self) -> ParseResult<Vec<Expression<N>>> {
        let mut statements = Vec::new();
        loop {
            while let Some((Token::Semicolon, _)) = self.tokens.peek() {
                self.tokens.next();
            }
            if self.tokens.peek().is_none() {
                break;
            }
            statements.push(self.parse_statement(statements.len())?);
        }
        Ok(statements)
    }

    pub(in crate::interpreter::parser) fn peek(&mut self) -> Option<(Token<'src>, usize)> {
        self.tokens.peek().copied()
    }
}
