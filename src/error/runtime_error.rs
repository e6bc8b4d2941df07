use crate::ast::Position;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// A variable, function or type name could not be resolved.
    SymbolNotFound {
        /// What was looked up, e.g. `Variable` or `Function`.
        kind:     &'static str,
        /// The name that could not be resolved.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A name was defined a second time in the same namespace.
    Redefinition {
        /// What was being defined, e.g. `variable` or `struct`.
        kind:     &'static str,
        /// The name that was already taken.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A value had a different type than the context required.
    TypeMismatch {
        /// The type the context required.
        expected: String,
        /// The type the value actually had.
        actual:   String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A function produced a value incompatible with its return type.
    ReturnTypeMismatch {
        /// The declared return type.
        expected: String,
        /// The type of the value actually produced.
        actual:   String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A struct was initialized with the wrong number of fields.
    InvalidFieldCount {
        /// How many fields the struct definition declares.
        expected: usize,
        /// How many values were supplied.
        actual:   usize,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A field name does not exist in the struct definition.
    InvalidField {
        /// The unknown field name.
        field:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// An `as` conversion between unsupported kinds was requested.
    InvalidTypeConversion {
        /// Description of the source value's kind.
        from:     String,
        /// Description of the requested target type.
        to:       String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// How many parameters the function declares.
        expected: usize,
        /// How many arguments were supplied.
        actual:   usize,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A by-reference parameter received something other than a variable.
    InvalidRefArgument {
        /// The name of the by-reference parameter.
        param:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// An expression was used for its value but produced none.
    MissingValue {
        /// The source position where the error occurred.
        position: Position,
    },
    /// Attempted integer division by zero.
    DivisionByZero {
        /// The source position where the error occurred.
        position: Position,
    },
    /// Integer arithmetic exceeded the representable range.
    Overflow {
        /// The source position where the error occurred.
        position: Position,
    },
    /// The output stream rejected a `print` write.
    PrintFailed {
        /// Description of the underlying I/O failure.
        reason:   String,
        /// The source position where the error occurred.
        position: Position,
    },
}

impl RuntimeError {
    /// Returns the source position at which the error was raised.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::SymbolNotFound { position, .. }
            | Self::Redefinition { position, .. }
            | Self::TypeMismatch { position, .. }
            | Self::ReturnTypeMismatch { position, .. }
            | Self::InvalidFieldCount { position, .. }
            | Self::InvalidField { position, .. }
            | Self::InvalidTypeConversion { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::InvalidRefArgument { position, .. }
            | Self::MissingValue { position, .. }
            | Self::DivisionByZero { position, .. }
            | Self::Overflow { position, .. }
            | Self::PrintFailed { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " at {}", self.position())?;

        match self {
            Self::SymbolNotFound { kind, name, .. } => write!(f, "{kind} {name} not found"),

            Self::Redefinition { kind, name, .. } => write!(f, "Redefinition of {name} {kind}"),

            Self::TypeMismatch { expected, actual, .. }
            | Self::ReturnTypeMismatch { expected, actual, .. } => {
                write!(f, "Expected: {expected}\nActual: {actual}")
            },

            Self::InvalidFieldCount { expected, actual, .. } => {
                write!(f, "Expected {expected} fields but {actual} were given")
            },

            Self::InvalidField { field, .. } => {
                write!(f, "Invalid struct's field name {field}")
            },

            Self::InvalidTypeConversion { from, to, .. } => {
                write!(f, "Cannot convert from {from} to {to}")
            },

            Self::ArgumentCountMismatch { expected, actual, .. } => {
                write!(f, "Expected {expected} arguments but {actual} were given")
            },

            Self::InvalidRefArgument { param, .. } => {
                write!(f, "Argument for ref parameter {param} must be a variable")
            },

            Self::MissingValue { .. } => write!(f, "Expression produced no value"),

            Self::DivisionByZero { .. } => write!(f, "Division by zero"),

            Self::Overflow { .. } => {
                write!(f, "Integer overflow while evaluating expression")
            },

            Self::PrintFailed { reason, .. } => {
                write!(f, "Failed to write program output: {reason}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
