//! # strukta
//!
//! strukta is an interpreter for a small imperative scripting language written
//! in Rust. The language offers structs, tagged-union variants, by-reference
//! parameters and a structural type system enforced while the program runs.

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

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expression` and `Statement` enums and related
/// types that represent the syntactic structure of source code as a tree. The
/// AST is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Carries function, struct and variant definitions into the evaluator.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while running a script,
/// split into parse errors (lexical and syntactic) and runtime errors (type
/// checks, lookups, arithmetic). Every kind carries the source position it
/// was raised at, and all of them render in the same `at line:column` form.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source positions and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code execution. It exposes the
/// building blocks behind the crate-level entry points.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Renders parsed code as an indented tree.
///
/// This module provides a read-only textual dump of a parsed program, used to
/// inspect what the parser produced without running the program.
///
/// # Responsibilities
/// - Walks the AST and renders every statement and expression.
/// - Keeps the output stable enough for debugging by eye.
pub mod printer;

/// Parses source code into a program.
///
/// The returned [`Program`] holds the top-level statements in source order.
/// Nothing is executed yet; definitions take effect once the program runs.
///
/// # Errors
/// Returns the first lexical or syntax error found in the source.
///
/// # Examples
/// ```
/// let program = strukta::parse("int x = 5;").unwrap();
/// assert_eq!(program.statements.len(), 1);
///
/// // '=' is missing, so parsing fails.
/// assert!(strukta::parse("int x 5;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parses and executes a whole program.
///
/// All `print` output is written to `output`. If execution succeeds, the
/// function returns `Ok(())`; otherwise it returns the first parse or runtime
/// error with details about the failure.
///
/// # Errors
/// Returns an error if parsing fails or if any runtime error occurs.
///
/// # Examples
/// ```
/// let mut output = Vec::new();
/// strukta::interpret("print 2 + 3;", &mut output).unwrap();
/// assert_eq!(output, b"5\n");
///
/// // 'y' is not defined, so execution fails.
/// let result = strukta::interpret("int x = y;", &mut Vec::new());
/// assert!(result.is_err());
/// ```
pub fn interpret<W: std::io::Write>(source: &str,
                                    output: W)
                                    -> Result<(), Box<dyn std::error::Error>> {
    let program = parse(source)?;
    let mut context = Context::new(output);
    context.run(&program)?;
    Ok(())
}
