/// Numeric types expression trees are generic over.
///
/// This module declares the [`num::Number`] trait together with its
/// implementations for fixed-width integers, floating-point numbers and
/// arbitrary-precision decimals. All arithmetic is checked and reports
/// failures as evaluation errors instead of panicking.
pub mod num;
