/// Parser entry point and per-call parsing state.
///
/// Holds [`Parser`], the statement loop and token lookahead shared by the
/// other parser modules.
pub mod core;

/// Statement parsing.
///
/// Splits a statement into an optional assignment target and an arithmetic
/// value, and evaluates assignments whose value is known.
pub mod statement;

/// Binary operator parsing by precedence climbing.
pub mod binary;

/// Unary minus, primary expressions and parenthesized sub-contexts.
pub mod unary;

pub use self::core::Parser;
