/// The evaluator module computes the values of expression trees.
///
/// Evaluation walks a tree bottom-up, applying the arithmetic of the tree's
/// numeric type. Assignments store their value into the target variable.
///
/// # Responsibilities
/// - Decides whether a tree has everything needed to be evaluated.
/// - Applies operators to operand values.
/// - Reports failures such as division by zero or overflow.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// Produces numbers, identifiers, operators, parentheses and statement
/// separators, each with its byte offset. Unrecognized input is passed on as
/// an unknown token rather than rejected.
pub mod lexer;
/// The parser module builds expression trees from statement text.
///
/// # Responsibilities
/// - Splits a context into `;`-separated statements.
/// - Applies operator priorities and associativity.
/// - Reports syntax errors with their byte position.
/// - Evaluates assignments whose value is known while parsing.
pub mod parser;
/// Variable bindings of one parse.
pub mod symbols;
