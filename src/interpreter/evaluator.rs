/// Value computation for expression nodes.
///
/// Implements `has_value` and `value` on [`crate::ast::Expression`], including
/// the side effect of assignment.
pub mod core;

/// Binary operator arithmetic.
///
/// Routes an operator to the checked arithmetic of the numeric type.
pub mod binary;
