/// Core evaluation logic and context management.
///
/// Contains the evaluation context with its scope stack and definition
/// registries, expression dispatch and whole-program execution.
pub mod core;

/// Statement execution.
///
/// Executes control flow, definitions, assignments and print statements and
/// propagates the return flow through nested blocks.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic,
/// comparisons and short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements sign change and logical negation, together with `as`
/// conversions and `is` type checks.
pub mod unary;

/// Declared type enforcement.
///
/// Validates values against declared types, rewrapping anonymous structs into
/// named structs and wrapping member values into variants.
pub mod types;

/// Function call evaluation.
///
/// Handles argument binding, by-reference aliasing, the fresh call scope and
/// return type checking.
pub mod function;

/// Field access evaluation and lvalue assignment.
///
/// Resolves field chains against struct definitions for reads and writes.
pub mod access;
