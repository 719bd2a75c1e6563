//! # exprtree
//!
//! exprtree parses arithmetic statements into mutable expression trees and
//! evaluates them over a numeric type of your choice.
//!
//! A context such as `r = 2; pi = 3; c = 4/3; c * pi * r ^3` is split into
//! statements, each of which becomes one tree. Variables are shared between
//! the statements of a context, and trees can be rebuilt, inspected and
//! re-evaluated after parsing.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines expression trees and their building blocks.
///
/// This module declares [`ast::Expression`], the node handle every tree is
/// made of, together with binary operators, their priority rules and shared
/// variables.
///
/// # Responsibilities
/// - Builds and mutates trees while keeping parent links consistent.
/// - Rejects structural changes that would create cycles or malformed
///   assignments.
/// - Provides structural equality, hashing, display and deep copies.
pub mod ast;
/// Provides unified error types for parsing, tree building and evaluation.
///
/// Parse errors carry the byte position they refer to; structural and
/// evaluation errors describe the offending operation.
pub mod error;
/// Turns text into trees.
///
/// Ties together lexing, parsing, symbol resolution and evaluation of
/// assignments met while parsing.
pub mod interpreter;
/// Numeric types trees can be built over.
///
/// This module defines the [`util::num::Number`] trait and its
/// implementations for machine integers, floating point numbers and
/// arbitrary precision decimals.
pub mod util;

pub use crate::{
    ast::{BinaryOperator, Expression, Variable},
    error::{Error, EvaluationError, ExpressionError, ParseError},
    interpreter::parser::Parser,
    util::num::{Number, NumberKind},
};

/// Parses a context into one tree per statement.
///
/// Shorthand for [`Parser::new`] followed by [`Parser::parse`].
///
/// # Examples
/// ```
/// let statements = exprtree::parse::<i64>("x = 2; x * 3 + 1").unwrap();
///
/// assert_eq!(statements.len(), 2);
/// assert_eq!(statements[1].to_string(), "x * 3 + 1");
/// ```
pub fn parse<N: Number>(context: &str) -> Result<Vec<Expression<N>>, ParseError> {
    Parser::new().parse(context)
}

/// Parses a context and returns the value of its last evaluable statement.
///
/// Statements are evaluated in order. Statements that cannot be evaluated,
/// because they use a variable that never received a value, are skipped.
/// Returns `Ok(None)` when no statement could be evaluated.
///
/// # Errors
/// Returns an error if parsing fails or if evaluating a statement fails.
///
/// # Examples
/// ```
/// let value = exprtree::evaluate::<i64>("r = 2; pi = 3; c = 4/3; c * pi * r ^3").unwrap();
/// assert_eq!(value, Some(24));
///
/// // `y` never gets a value, so only the assignment is evaluated.
/// let value = exprtree::evaluate::<f64>("x = 0.5; y * x").unwrap();
/// assert_eq!(value, Some(0.5));
///
/// // Division by zero fails.
/// assert!(exprtree::evaluate::<i64>("1 / 0").is_err());
/// ```
pub fn evaluate<N: Number>(context: &str) -> Result<Option<N>, Error> {
    let statements = parse::<N>(context)?;
    Ok(evaluate_statements(&statements)?)
}

/// Evaluates parsed statements in order and returns the last value.
///
/// Follows the same rules as [`evaluate`]: an assignment counts once its
/// value can be computed, other statements once every variable they use has
/// a value. Statements that cannot be evaluated yet are skipped.
///
/// # Errors
/// Returns the first evaluation failure.
///
/// # Examples
/// ```
/// let statements = exprtree::parse::<i64>("x = 4; x * x; y").unwrap();
/// assert_eq!(exprtree::evaluate_statements(&statements).unwrap(), Some(16));
/// ```
pub fn evaluate_statements<N: Number>(statements: &[Expression<N>]) -> Result<Option<N>, EvaluationError> {
    let mut result = None;

    for statement in statements {
        let ready = if statement.is_assignment() {
            statement.right().is_some_and(|value| value.has_value())
        } else {
            statement.has_value()
        };
        if ready {
            result = Some(statement.value()?);
        }
    }

    Ok(result)
}
