use logos::Logos;

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexicalError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Float literal tokens, such as `3.14`. A decimal point must be
    /// followed by at least one digit.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    #[regex(r"[0-9]+\.", malformed_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_int)]
    Int(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens. Escapes are limited to `\n`, `\t`, `\"` and
    /// `\\`; a raw newline inside the quotes is allowed.
    #[regex(r#""([^"\\]|\\[\s\S])*""#, unescape_str)]
    #[regex(r#""([^"\\]|\\[\s\S])*"#, unterminated_str)]
    Str(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `if`
    #[token("if")]
    If,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `print`
    #[token("print")]
    Print,
    /// `const`
    #[token("const")]
    Const,
    /// `ref`
    #[token("ref")]
    Ref,
    /// `struct`
    #[token("struct")]
    Struct,
    /// `variant`
    #[token("variant")]
    Variant,
    /// `or`
    #[token("or")]
    Or,
    /// `and`
    #[token("and")]
    And,
    /// `not`
    #[token("not")]
    Not,
    /// `as`
    #[token("as")]
    As,
    /// `is`
    #[token("is")]
    Is,
    /// `void`
    #[token("void")]
    Void,
    /// `int`
    #[token("int")]
    IntType,
    /// `float`
    #[token("float")]
    FloatType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// `str`
    #[token("str")]
    StrType,
    /// Identifier tokens; variable, function or type names such as `x` or
    /// `Point`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
}

/// Failure modes of the lexer itself, before positions are attached.
///
/// [`TokenStream`] converts these into [`ParseError`] values carrying the
/// source position of the offending token.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexicalError {
    /// No token can start with the character at the current offset.
    #[default]
    InvalidToken,
    /// The input ended inside a string literal.
    UnterminatedString,
    /// A backslash escape used a character that cannot be escaped.
    NonEscapableChar(char),
    /// A numeric literal does not fit in the integral value range.
    NumericOverflow,
    /// A float literal had no digits after the decimal point.
    MalformedFloat,
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed integer value.
/// - `Err(LexicalError::NumericOverflow)`: If the literal exceeds `i64`.
fn parse_int(lex: &logos::Lexer<Token>) -> Result<i64, LexicalError> {
    lex.slice().parse().map_err(|_| LexicalError::NumericOverflow)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(f64)`: The parsed floating-point value.
/// - `Err(LexicalError::NumericOverflow)`: If the literal is not finitely
///   representable as `f64`.
fn parse_float(lex: &logos::Lexer<Token>) -> Result<f64, LexicalError> {
    let value: f64 = lex.slice().parse().map_err(|_| LexicalError::NumericOverflow)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(LexicalError::NumericOverflow)
    }
}

/// Rejects a digits-then-dot literal with no fractional digits.
fn malformed_float(_: &logos::Lexer<Token>) -> Result<f64, LexicalError> {
    Err(LexicalError::MalformedFloat)
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(true)` if the slice is `"true"`.
/// - `Some(false)` if the slice is `"false"`.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a terminated string literal and resolves escapes.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(String)`: The literal's contents with escapes resolved.
/// - `Err(LexicalError::NonEscapableChar)`: If a backslash precedes a
///   character other than `n`, `t`, `"` or `\`.
fn unescape_str(lex: &logos::Lexer<Token>) -> Result<String, LexicalError> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => return Err(LexicalError::NonEscapableChar(other)),
            None => return Err(LexicalError::UnterminatedString),
        }
    }

    Ok(result)
}

/// Rejects a string literal that was still open at the end of input.
fn unterminated_str(_: &logos::Lexer<Token>) -> Result<String, LexicalError> {
    Err(LexicalError::UnterminatedString)
}

/// Pull-based token source that attaches a source position to every token.
///
/// Tokens are produced on demand, one at a time, so a lexical error is only
/// raised once parsing actually reaches it. Positions are derived from byte
/// offsets by counting newlines between the previously scanned offset and
/// the token start; columns count characters from the start of the line,
/// both 1-based.
pub struct TokenStream<'a> {
    lexer:      logos::Lexer<'a, Token>,
    source:     &'a str,
    scanned:    usize,
    line:       usize,
    line_start: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a token stream over the given source text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { lexer: Token::lexer(source),
               source,
               scanned: 0,
               line: 1,
               line_start: 0 }
    }

    /// Returns the next token and its position, or `None` at end of input.
    ///
    /// # Errors
    /// Returns a [`ParseError`] describing the first lexical error in the
    /// remaining input, positioned at the start of the offending token.
    pub fn next_token(&mut self) -> Result<Option<(Token, Position)>, ParseError> {
        let Some(token) = self.lexer.next() else {
            return Ok(None);
        };

        let position = self.position_of(self.lexer.span().start);

        match token {
            Ok(token) => Ok(Some((token, position))),
            Err(error) => Err(self.describe_error(error, position)),
        }
    }

    /// Returns the position one past the last character of the input.
    pub fn end_position(&mut self) -> Position {
        self.position_of(self.source.len())
    }

    fn describe_error(&self, error: LexicalError, position: Position) -> ParseError {
        match error {
            LexicalError::InvalidToken => {
                let character = self.lexer.slice().chars().next().unwrap_or('\0');
                ParseError::InvalidToken { character, position }
            },
            LexicalError::UnterminatedString => ParseError::UnterminatedString { position },
            LexicalError::NonEscapableChar(character) => {
                ParseError::NonEscapableChar { character, position }
            },
            LexicalError::NumericOverflow => ParseError::NumericOverflow { position },
            LexicalError::MalformedFloat => ParseError::MalformedFloat { position },
        }
    }

    fn position_of(&mut self, offset: usize) -> Position {
        let bytes = self.source.as_bytes();

        while self.scanned < offset {
            if bytes[self.scanned] == b'\n' {
                self.line += 1;
                self.line_start = self.scanned + 1;
            }
            self.scanned += 1;
        }

        let column = self.source[self.line_start..offset].chars().count() + 1;

        Position::new(self.line, column)
    }
}
