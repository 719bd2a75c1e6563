/// Expression tree nodes.
///
/// Declares [`Expression`], the handle type for constants, variable
/// occurrences and binary operations, together with the structural checks
/// that keep every tree acyclic and every node single-parented.
pub mod expression;
/// Binary operators and their precedence rules.
pub mod operator;
/// Named numeric cells shared between variable occurrences.
pub mod variable;

pub use expression::{Expression, ExpressionKind};
pub use operator::{Associativity, BinaryOperator, OperatorRules};
pub use variable::Variable;
