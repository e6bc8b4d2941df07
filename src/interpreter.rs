/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, executes statements, evaluates expressions,
/// enforces declared types against runtime values, manages lexical scopes and
/// produces program output. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Executes statements in order and propagates the return flow.
/// - Handles variables, user-defined types, functions and control flow.
/// - Reports runtime errors such as type mismatches or unknown symbols.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Supports definitions, assignments, control flow, calls and more.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value kinds used during execution: the four
/// primitives, anonymous and named structs, and variants. It also provides
/// methods for describing values in diagnostics and querying their runtime
/// type.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements display formatting for program output.
/// - Tracks which definition a struct or variant value is bound to.
pub mod value;
