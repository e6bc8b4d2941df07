use crate::{
    ast::{Expression, Position, Program, Statement, Type},
    error::ParseError,
    interpreter::lexer::{Token, TokenStream},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a pull-based token stream.
///
/// The parser keeps exactly one token of lookahead (`current`) and never
/// pushes tokens back. Statement and expression parsers either commit by
/// consuming input or decline by leaving `current` untouched, so the first
/// construct to match wins. Parsing aborts on the first error.
///
/// Methods are split across the sibling modules by concern: statements in
/// [`super::statement`], binary precedence levels in [`super::binary`] and
/// unary, type and primary expressions in [`super::unary`].
pub struct Parser<'a> {
    pub(in crate::interpreter::parser) tokens:   TokenStream<'a>,
    pub(in crate::interpreter::parser) current:  Option<Token>,
    pub(in crate::interpreter::parser) position: Position,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given source text and pulls the first token.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the input starts with a lexical error.
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut parser = Self { tokens:   TokenStream::new(source),
                                current:  None,
                                position: Position::new(1, 1), };
        parser.advance()?;

        Ok(parser)
    }

    /// Parses the entire input into a [`Program`].
    ///
    /// Any input left over after the last recognized statement is a hard
    /// error; a valid program is consumed to the very end.
    ///
    /// # Errors
    /// Returns the first lexical or syntax error in the input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let statements = self.parse_statements()?;

        if self.current.is_some() {
            return Err(self.syntax_error("Unknown statement"));
        }

        Ok(Program { statements })
    }

    /// Parses statements until no statement parser matches.
    ///
    /// The caller decides whether the stopping point is legal: the end of
    /// input for a program, a closing brace for a block body.
    pub(in crate::interpreter::parser) fn parse_statements(&mut self)
                                                           -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        while let Some(statement) = self.parse_statement()? {
            statements.push(statement);
        }

        Ok(statements)
    }

    /// Parses a full expression.
    ///
    /// A struct initializer (`{ expr, ... }`) is attempted first, so it is
    /// only reachable where a full expression is expected, such as after `=`
    /// or inside argument lists, never inside arithmetic.
    ///
    /// The rule is: `expression := struct_init | disjunction`
    ///
    /// # Returns
    /// - `Ok(Some(expression))` if an expression was parsed.
    /// - `Ok(None)` if no expression starts at the current token.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self)
                                                           -> ParseResult<Option<Expression>> {
        if let Some(init) = self.parse_struct_init()? {
            return Ok(Some(init));
        }
        self.parse_disjunction()
    }

    /// Parses a struct initializer expression.
    ///
    /// The rule is: `struct_init := "{" [ expression { "," expression } ] "}"`
    fn parse_struct_init(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        if !self.consume_if(&Token::LBrace)? {
            return Ok(None);
        }

        let values = self.parse_list(Self::parse_expression, "Expected expression after comma")?;

        self.expect(&Token::RBrace,
                    "Missing right curly brace at the end of struct initialization")?;

        Ok(Some(Expression::StructInit { values, position }))
    }

    /// Parses a comma-separated list of elements.
    ///
    /// An empty list is legal; after a comma the next element is required
    /// and its absence raises `missing` as a syntax error.
    pub(in crate::interpreter::parser) fn parse_list<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> ParseResult<Option<T>>,
        missing: &str)
        -> ParseResult<Vec<T>> {
        let mut items = Vec::new();

        let Some(first) = element(self)? else {
            return Ok(items);
        };
        items.push(first);

        while self.consume_if(&Token::Comma)? {
            let item = element(self)?.ok_or_else(|| self.syntax_error(missing))?;
            items.push(item);
        }

        Ok(items)
    }

    /// Pulls the next token into `current`, recording its position.
    ///
    /// At end of input `current` becomes `None` and the position points one
    /// past the last character, so errors raised there still land usefully.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> ParseResult<()> {
        match self.tokens.next_token()? {
            Some((token, position)) => {
                self.current = Some(token);
                self.position = position;
            },
            None => {
                self.current = None;
                self.position = self.tokens.end_position();
            },
        }

        Ok(())
    }

    /// Returns whether the current token equals `token`.
    pub(in crate::interpreter::parser) fn check(&self, token: &Token) -> bool {
        self.current.as_ref() == Some(token)
    }

    /// Consumes the current token if it equals `token`.
    ///
    /// # Returns
    /// `true` if the token matched and was consumed.
    pub(in crate::interpreter::parser) fn consume_if(&mut self, token: &Token)
                                                     -> ParseResult<bool> {
        if self.check(token) {
            self.advance()?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Consumes the current token or fails with `message`.
    pub(in crate::interpreter::parser) fn expect(&mut self, token: &Token, message: &str)
                                                 -> ParseResult<()> {
        if self.consume_if(token)? {
            return Ok(());
        }

        Err(self.syntax_error(message))
    }

    /// Consumes an identifier token and returns its name, or fails with
    /// `message`.
    pub(in crate::interpreter::parser) fn expect_identifier(&mut self, message: &str)
                                                            -> ParseResult<String> {
        if let Some(Token::Identifier(name)) = &self.current {
            let name = name.clone();
            self.advance()?;
            return Ok(name);
        }

        Err(self.syntax_error(message))
    }

    /// Reads the current token as a type name without consuming it.
    ///
    /// Built-in type keywords map to their primitive types; a plain
    /// identifier names a user-defined struct or variant type.
    pub(in crate::interpreter::parser) fn current_type(&self) -> Option<Type> {
        match &self.current {
            Some(Token::IntType) => Some(Type::Int),
            Some(Token::FloatType) => Some(Type::Float),
            Some(Token::BoolType) => Some(Type::Bool),
            Some(Token::StrType) => Some(Type::Str),
            Some(Token::Identifier(name)) => Some(Type::Named(name.clone())),
            _ => None,
        }
    }

    /// Builds a syntax error at the current token's position.
    pub(in crate::interpreter::parser) fn syntax_error(&self, message: &str) -> ParseError {
        ParseError::Syntax { message:  message.to_string(),
                             position: self.position, }
    }
}
