/// Parser state and shared parsing machinery.
///
/// Defines the [`core::Parser`] type, its token lookahead helpers, and the
/// entry points for programs, statement sequences and full expressions.
pub mod core;

/// Statement parsing.
///
/// Implements the ordered chain of statement parsers: control flow,
/// definitions, assignments and bare function calls.
pub mod statement;

/// Binary expression parsing.
///
/// Implements the precedence levels for logical, comparison, additive and
/// multiplicative operators.
pub mod binary;

/// Unary, type and primary expression parsing.
///
/// Handles unary prefixes, `as`/`is` suffixes, field access chains,
/// literals, nested expressions and call argument lists.
pub mod unary;
