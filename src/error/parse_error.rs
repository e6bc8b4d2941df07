use crate::ast::Position;

#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Encountered a character no token can start with.
    InvalidToken {
        /// The offending character.
        character: char,
        /// The source position where the error occurred.
        position:  Position,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The source position where the error occurred.
        position: Position,
    },
    /// A backslash escape used a character that cannot be escaped.
    NonEscapableChar {
        /// The character that followed the backslash.
        character: char,
        /// The source position where the error occurred.
        position:  Position,
    },
    /// An integer literal does not fit in the integral value range.
    NumericOverflow {
        /// The source position where the error occurred.
        position: Position,
    },
    /// A float literal had no digits after the decimal point.
    MalformedFloat {
        /// The source position where the error occurred.
        position: Position,
    },
    /// The current token did not satisfy a grammar expectation.
    Syntax {
        /// Details about the unmet expectation.
        message:  String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A variant definition listed no member types.
    EmptyVariant {
        /// The source position where the error occurred.
        position: Position,
    },
}

impl ParseError {
    /// Returns the source position at which the error was raised.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidToken { position, .. }
            | Self::UnterminatedString { position, .. }
            | Self::NonEscapableChar { position, .. }
            | Self::NumericOverflow { position, .. }
            | Self::MalformedFloat { position, .. }
            | Self::Syntax { position, .. }
            | Self::EmptyVariant { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " at {}", self.position())?;

        match self {
            Self::InvalidToken { character, .. } => {
                write!(f, "Unknown token starting with '{character}'")
            },

            Self::UnterminatedString { .. } => {
                write!(f, "Encountered end of file while processing str literal")
            },

            Self::NonEscapableChar { character, .. } => {
                write!(f, "'{character}' cannot be escaped with '\\'")
            },

            Self::NumericOverflow { .. } => {
                write!(f, "Detected overflow while constructing numeric literal")
            },

            Self::MalformedFloat { .. } => {
                write!(f, "Expected digit after '.' in float literal")
            },

            Self::Syntax { message, .. } => write!(f, "{message}"),

            Self::EmptyVariant { .. } => {
                write!(f, "Expected at least one type in variant definition")
            },
        }
    }
}

impl std::error::Error for ParseError {}
