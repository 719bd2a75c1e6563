use std::fmt;

use logos::Logos;

use crate::ast::BinaryOperator;

/// Represents a lexical token in the source input.
///
/// Numeric literals are kept as source slices: how a literal is read depends
/// on the numeric type of the parser consuming it.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token<'src> {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),
    /// Identifier tokens; variable names such as `x` or `r2`.
    #[regex(r"[A-Za-z][A-Za-z0-9]*", |lex| lex.slice())]
    Identifier(&'src str),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
    /// Input matching no rule. Produced by [`Tokenizer`], never by logos.
    Unknown(&'src str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) | Self::Identifier(text) | Self::Unknown(text) => write!(f, "{text}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::Equals => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Semicolon => write!(f, ";"),
            Self::Ignored => Ok(()),
        }
    }
}

/// Maps a token to its corresponding binary operator.
///
/// # Example
/// ```
/// use exprtree::{
///     ast::BinaryOperator,
///     interpreter::lexer::{Token, token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Caret), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token<'_>) -> Option<BinaryOperator> {
    match token {
        Token::Equals => Some(BinaryOperator::Assign),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}

/// Lazy token stream over a source string.
///
/// Yields `(token, position)` pairs, where `position` is the byte offset of
/// the token. Input that matches no rule is yielded as [`Token::Unknown`]; it
/// only becomes an error once the parser tries to consume it. The stream can
/// be walked once.
pub struct Tokenizer<'src> {
    lexer: logos::Lexer<'src, Token<'src>>,
}

impl<'src> Tokenizer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer: Token::lexer(source) }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = (Token<'src>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next()?;
        let position = self.lexer.span().start;
        Some((token.unwrap_or_else(|()| Token::Unknown(self.lexer.slice())), position))
    }
}
