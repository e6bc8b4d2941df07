use std::fmt;

/// A source location attached to tokens, expressions and statements.
///
/// Both coordinates are 1-based. Every diagnostic the crate produces points at
/// a `Position`, so the lexer, parser and interpreter all thread it through
/// their nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number in the source code.
    pub line:   usize,
    /// Column number within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line/column pair.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A type as it appears in declarations.
///
/// Types name either one of the four built-in kinds or a user-defined struct
/// or variant. User type names are resolved against the interpreter's
/// registries only when a value is bound, never at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 64-bit signed integer (`int`).
    Int,
    /// 64-bit floating-point number (`float`).
    Float,
    /// Boolean (`bool`).
    Bool,
    /// Character string (`str`).
    Str,
    /// A user-defined struct or variant, referenced by name.
    Named(String),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Bool => write!(f, "BOOL"),
            Self::Str => write!(f, "STR"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// The declared result type of a function.
///
/// `VOID` is valid only here; no value ever carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    /// The function produces no value.
    Void,
    /// The function produces a value of the given type.
    Value(Type),
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "VOID"),
            Self::Value(inner) => write!(f, "{inner}"),
        }
    }
}

/// A literal constant appearing directly in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A boolean literal: `true` or `false`.
    Bool(bool),
    /// A string literal with escapes already resolved.
    Str(String),
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A binary operator, from loosest (`or`) to tightest (`/`) precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Short-circuit disjunction (`or`).
    Or,
    /// Short-circuit conjunction (`and`).
    And,
    /// Equality (`==`).
    Equal,
    /// Inequality (`!=`).
    NotEqual,
    /// Less than (`<`).
    Less,
    /// Less than or equal (`<=`).
    LessEqual,
    /// Greater than (`>`).
    Greater,
    /// Greater than or equal (`>=`).
    GreaterEqual,
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Subtract,
    /// Multiplication (`*`).
    Multiply,
    /// Division (`/`).
    Divide,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        };
        write!(f, "{operator}")
    }
}

/// A unary prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic sign change (`-x`).
    Negate,
    /// Logical negation (`not x`).
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not"),
        }
    }
}

/// One argument in a function call.
///
/// The `ref` keyword may be written at the call site; binding by reference is
/// driven by the parameter's declaration, so the flag here is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The argument expression.
    pub value:  Expression,
    /// Whether the call site spelled out `ref`.
    pub by_ref: bool,
}

/// An abstract syntax tree node representing an expression.
///
/// Expressions form an exclusively owned tree; every node carries the position
/// of its first token (binary folds keep the left-most operand's position).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal constant.
    Constant {
        /// The constant value.
        value:    Constant,
        /// Position of the literal token.
        position: Position,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Position of the identifier.
        position: Position,
    },
    /// A brace-enclosed struct initializer, e.g. `{1, 2.5, "x"}`.
    ///
    /// Produces an anonymous struct value; it acquires a definition only when
    /// bound to a location declared with a struct type.
    StructInit {
        /// Field value expressions, in order.
        values:   Vec<Self>,
        /// Position of the opening brace.
        position: Position,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the left operand's first token.
        position: Position,
    },
    /// A unary prefix operation (`-x`, `not x`).
    Unary {
        /// The operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position of the operator token.
        position: Position,
    },
    /// An explicit conversion, e.g. `x as float`.
    Conversion {
        /// The expression being converted.
        expr:     Box<Self>,
        /// The target type.
        target:   Type,
        /// Position of the `as` keyword.
        position: Position,
    },
    /// A runtime type test, e.g. `v is int`.
    TypeCheck {
        /// The expression being inspected.
        expr:     Box<Self>,
        /// The type compared against.
        target:   Type,
        /// Position of the `is` keyword.
        position: Position,
    },
    /// Field access on a struct value, e.g. `p.x`.
    FieldAccess {
        /// The expression producing the struct.
        base:     Box<Self>,
        /// Name of the accessed field.
        field:    String,
        /// Position of the base expression.
        position: Position,
    },
    /// A function call used as an expression.
    FunctionCall {
        /// Name of the called function.
        name:      String,
        /// Arguments, in order.
        arguments: Vec<Argument>,
        /// Position of the function name.
        position:  Position,
    },
}

impl Expression {
    /// Gets the source position of the expression's first token.
    ///
    /// # Example
    /// ```
    /// use strukta::ast::{Expression, Position};
    ///
    /// let expr = Expression::Variable { name:     "x".to_string(),
    ///                                   position: Position::new(2, 7), };
    ///
    /// assert_eq!(expr.position(), Position::new(2, 7));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Constant { position, .. }
            | Self::Variable { position, .. }
            | Self::StructInit { position, .. }
            | Self::Binary { position, .. }
            | Self::Unary { position, .. }
            | Self::Conversion { position, .. }
            | Self::TypeCheck { position, .. }
            | Self::FieldAccess { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }
}

/// The target of an assignment: a variable or a field chain rooted in one.
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    /// A plain variable name.
    Variable(String),
    /// A field of the location designated by the inner lvalue.
    Field {
        /// The location holding the struct.
        base:  Box<LValue>,
        /// Name of the assigned field.
        field: String,
    },
}

/// A single declared function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The declared parameter type.
    pub declared_type: Type,
    /// The parameter name.
    pub name:          String,
    /// Whether the parameter aliases the caller's variable.
    pub by_ref:        bool,
}

/// A user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    /// The declared return type, possibly `VOID`.
    pub return_type: ReturnType,
    /// The function name.
    pub name:        String,
    /// Declared parameters, in order.
    pub parameters:  Vec<Parameter>,
    /// The statements of the function body.
    pub body:        Vec<Statement>,
    /// Position of the statement that defined the function.
    pub position:    Position,
}

/// A single declared struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The declared field type.
    pub declared_type: Type,
    /// The field name.
    pub name:          String,
}

/// A user-defined struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// The struct name.
    pub name:     String,
    /// Declared fields, in order.
    pub fields:   Vec<Field>,
    /// Position of the definition.
    pub position: Position,
}

impl StructDef {
    /// Finds the index of a field by name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// A user-defined tagged union over a non-empty list of member types.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    /// The variant name.
    pub name:     String,
    /// Member types; the parser guarantees at least one.
    pub types:    Vec<Type>,
    /// Position of the definition.
    pub position: Position,
}

/// An abstract syntax tree node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Conditional execution of a nested statement list.
    If {
        /// The condition; must evaluate to BOOL.
        condition: Expression,
        /// Statements executed when the condition holds.
        body:      Vec<Self>,
        /// Position of the `if` keyword.
        position:  Position,
    },
    /// A pre-checked loop over a nested statement list.
    While {
        /// The condition; re-evaluated before every iteration.
        condition: Expression,
        /// Statements executed each iteration.
        body:      Vec<Self>,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// Return from the enclosing function, with an optional value.
    Return {
        /// The returned expression, absent for bare `return;`.
        value:    Option<Expression>,
        /// Position of the `return` keyword.
        position: Position,
    },
    /// Print a value (or an empty line) to the program output.
    Print {
        /// The printed expression, absent for bare `print;`.
        value:    Option<Expression>,
        /// Position of the `print` keyword.
        position: Position,
    },
    /// A function definition; registered when the statement executes.
    FunctionDef(FuncDef),
    /// Assignment to a variable or struct field.
    Assignment {
        /// The assigned location.
        target:   LValue,
        /// The assigned expression.
        value:    Expression,
        /// Position of the statement's first token.
        position: Position,
    },
    /// Definition of a new variable in the current scope.
    VarDef {
        /// Whether the definition used `const`.
        is_const:      bool,
        /// The declared variable type.
        declared_type: Type,
        /// The variable name.
        name:          String,
        /// The initializer expression.
        value:         Expression,
        /// Position of the statement's first token.
        position:      Position,
    },
    /// A bare function call executed for its effects.
    FunctionCall {
        /// Name of the called function.
        name:      String,
        /// Arguments, in order.
        arguments: Vec<Argument>,
        /// Position of the function name.
        position:  Position,
    },
    /// A struct definition; registered when the statement executes.
    StructDef(StructDef),
    /// A variant definition; registered when the statement executes.
    VariantDef(VariantDef),
}

impl Statement {
    /// Gets the source position of the statement's first token.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::If { position, .. }
            | Self::While { position, .. }
            | Self::Return { position, .. }
            | Self::Print { position, .. }
            | Self::Assignment { position, .. }
            | Self::VarDef { position, .. }
            | Self::FunctionCall { position, .. } => *position,
            Self::FunctionDef(def) => def.position,
            Self::StructDef(def) => def.position,
            Self::VariantDef(def) => def.position,
        }
    }
}

/// A fully parsed source file: top-level statements in written order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements.
    pub statements: Vec<Statement>,
}
