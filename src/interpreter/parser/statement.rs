use crate::{
    ast::{
        Expression, Field, FuncDef, LValue, Parameter, Position, ReturnType, Statement, StructDef,
        Type, VariantDef,
    },
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - an `if` or `while` statement.
    /// - a `return` or `print` statement.
    /// - a `const` variable definition.
    /// - a `void` function definition.
    /// - an identifier-led definition, assignment or bare function call.
    /// - a definition typed with a built-in type.
    /// - a `struct` or `variant` definition.
    ///
    /// Parsing is attempted in that order; the first parser to recognize the
    /// current token commits and the rest are never consulted. Every node
    /// carries the position of the statement's first token.
    ///
    /// # Returns
    /// - `Ok(Some(statement))` if a statement was parsed.
    /// - `Ok(None)` if no statement starts at the current token.
    pub fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let position = self.position;

        if let Some(statement) = self.parse_if_statement(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_while_statement(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_return_statement(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_print_statement(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_const_var_def(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_void_func(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_def_or_assignment(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_built_in_def(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_struct_def(position)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.parse_variant_def(position)? {
            return Ok(Some(statement));
        }

        Ok(None)
    }

    /// Parses an `if` statement.
    ///
    /// The rule is: `if_stmt := "if" disjunction "{" statements "}"`
    ///
    /// The condition is a disjunction rather than a full expression, so a
    /// struct initializer cannot swallow the opening brace of the body.
    fn parse_if_statement(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::If)? {
            return Ok(None);
        }

        let condition = self.parse_disjunction()?
                            .ok_or_else(|| self.syntax_error("Expected if-statement condition"))?;

        self.expect(&Token::LBrace, "Missing left curly brace")?;
        let body = self.parse_statements()?;
        self.expect(&Token::RBrace, "Missing right curly brace")?;

        Ok(Some(Statement::If { condition,
                                body,
                                position }))
    }

    /// Parses a `while` statement.
    ///
    /// The rule is: `while_stmt := "while" disjunction "{" statements "}"`
    fn parse_while_statement(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::While)? {
            return Ok(None);
        }

        let condition =
            self.parse_disjunction()?
                .ok_or_else(|| self.syntax_error("Expected while-statement condition"))?;

        self.expect(&Token::LBrace, "Missing left curly brace")?;
        let body = self.parse_statements()?;
        self.expect(&Token::RBrace, "Missing right curly brace")?;

        Ok(Some(Statement::While { condition,
                                   body,
                                   position }))
    }

    /// Parses a `return` statement with an optional value.
    ///
    /// The rule is: `ret_stmt := "return" [ expression ] ";"`
    fn parse_return_statement(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Return)? {
            return Ok(None);
        }

        let value = self.parse_expression()?;

        self.expect(&Token::Semicolon, "Missing semicolon after return statement")?;

        Ok(Some(Statement::Return { value, position }))
    }

    /// Parses a `print` statement with an optional value.
    ///
    /// The rule is: `print_stmt := "print" [ expression ] ";"`
    fn parse_print_statement(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Print)? {
            return Ok(None);
        }

        let value = self.parse_expression()?;

        self.expect(&Token::Semicolon, "Missing semicolon after print statement")?;

        Ok(Some(Statement::Print { value, position }))
    }

    /// Parses a `const` variable definition.
    ///
    /// The rule is: `const_var_def := "const" type identifier "=" expression ";"`
    fn parse_const_var_def(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Const)? {
            return Ok(None);
        }

        let declared_type = self.current_type()
                                .ok_or_else(|| self.syntax_error("Expected variable type"))?;
        self.advance()?;

        let name = self.expect_identifier("Expected variable name")?;
        let value = self.parse_assignment_value()?;

        Ok(Some(Statement::VarDef { is_const: true,
                                    declared_type,
                                    name,
                                    value,
                                    position }))
    }

    /// Parses a `void` function definition.
    ///
    /// The rule is: `void_func := "void" identifier func_def`
    fn parse_void_func(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Void)? {
            return Ok(None);
        }

        let name = self.expect_identifier("Expected function name")?;

        match self.parse_function_def(ReturnType::Void, name, position)? {
            Some(statement) => Ok(Some(statement)),
            None => Err(self.syntax_error("Missing left parenthesis after function name")),
        }
    }

    /// Parses a statement led by an identifier.
    ///
    /// After consuming the leading identifier, the alternatives are tried in
    /// order:
    /// - a second identifier makes it a definition (the leading identifier
    ///   was a user type name),
    /// - a left parenthesis makes it a bare function call statement,
    /// - anything else is an assignment to the identifier or to a field
    ///   chain rooted in it.
    ///
    /// The rule is: `def_or_asgn := identifier ( def | func_call ";" | field_asgn )`
    fn parse_def_or_assignment(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        let Some(Token::Identifier(name)) = &self.current else {
            return Ok(None);
        };
        let name = name.clone();
        self.advance()?;

        if let Some(definition) = self.parse_definition(Type::Named(name.clone()), position)? {
            return Ok(Some(definition));
        }

        if let Some(arguments) = self.parse_call_args()? {
            self.expect(&Token::Semicolon, "Missing semicolon after function call")?;
            return Ok(Some(Statement::FunctionCall { name,
                                                     arguments,
                                                     position }));
        }

        self.parse_field_assignment(name, position).map(Some)
    }

    /// Parses an assignment to a variable or a field chain rooted in one.
    ///
    /// The rule is: `field_asgn := { "." identifier } "=" expression ";"`
    fn parse_field_assignment(&mut self, name: String, position: Position)
                              -> ParseResult<Statement> {
        let mut target = LValue::Variable(name);

        while self.consume_if(&Token::Dot)? {
            let field = self.expect_identifier("Expected field name after dot operator")?;
            target = LValue::Field { base: Box::new(target),
                                     field };
        }

        let value = self.parse_assignment_value()?;

        Ok(Statement::Assignment { target,
                                   value,
                                   position })
    }

    /// Parses the `= expression ;` tail shared by definitions and
    /// assignments.
    fn parse_assignment_value(&mut self) -> ParseResult<Expression> {
        self.expect(&Token::Equals, "Expected assignment operator")?;

        let value = self.parse_expression()?
                        .ok_or_else(|| self.syntax_error("Expected expression after assignment"))?;

        self.expect(&Token::Semicolon, "Missing semicolon")?;

        Ok(value)
    }

    /// Parses a definition typed with a built-in type.
    ///
    /// The rule is: `built_in_def := built_in_type def`
    fn parse_built_in_def(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        let declared_type = match &self.current {
            Some(Token::IntType) => Type::Int,
            Some(Token::FloatType) => Type::Float,
            Some(Token::BoolType) => Type::Bool,
            Some(Token::StrType) => Type::Str,
            _ => return Ok(None),
        };
        self.advance()?;

        match self.parse_definition(declared_type, position)? {
            Some(statement) => Ok(Some(statement)),
            None => Err(self.syntax_error("Expected variable name")),
        }
    }

    /// Parses the name-led tail of a variable or function definition.
    ///
    /// The declared type has already been consumed by the caller. A left
    /// parenthesis after the name turns the definition into a function with
    /// that return type; otherwise an initializer is required.
    ///
    /// The rule is: `def := identifier ( func_def | "=" expression ";" )`
    fn parse_definition(&mut self, declared_type: Type, position: Position)
                        -> ParseResult<Option<Statement>> {
        let Some(Token::Identifier(name)) = &self.current else {
            return Ok(None);
        };
        let name = name.clone();
        self.advance()?;

        let return_type = ReturnType::Value(declared_type.clone());
        if let Some(function) = self.parse_function_def(return_type, name.clone(), position)? {
            return Ok(Some(function));
        }

        let value = self.parse_assignment_value()?;

        Ok(Some(Statement::VarDef { is_const: false,
                                    declared_type,
                                    name,
                                    value,
                                    position }))
    }

    /// Parses the parameter list and body of a function definition.
    ///
    /// Declines without consuming input when the current token is not a left
    /// parenthesis, so definition parsing can fall back to a variable
    /// definition.
    ///
    /// The rule is: `func_def := "(" parameters ")" "{" statements "}"`
    fn parse_function_def(&mut self, return_type: ReturnType, name: String, position: Position)
                          -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::LParen)? {
            return Ok(None);
        }

        let parameters = self.parse_list(Self::parse_parameter, "Expected parameter after comma")?;

        self.expect(&Token::RParen, "Missing right parenthesis after function parameter list")?;
        self.expect(&Token::LBrace, "Missing left curly brace before function body")?;

        let body = self.parse_statements()?;

        self.expect(&Token::RBrace, "Missing right curly brace after function body")?;

        Ok(Some(Statement::FunctionDef(FuncDef { return_type,
                                                 name,
                                                 parameters,
                                                 body,
                                                 position })))
    }

    /// Parses a single function parameter.
    ///
    /// The rule is: `param := [ "ref" ] type identifier`
    fn parse_parameter(&mut self) -> ParseResult<Option<Parameter>> {
        let by_ref = self.consume_if(&Token::Ref)?;

        let Some(declared_type) = self.current_type() else {
            if by_ref {
                return Err(self.syntax_error("Expected parameter type after ref keyword"));
            }
            return Ok(None);
        };
        self.advance()?;

        let name = self.expect_identifier("Expected parameter name")?;

        Ok(Some(Parameter { declared_type,
                            name,
                            by_ref }))
    }

    /// Parses a `struct` definition.
    ///
    /// The rule is: `struct_def := "struct" identifier "{" fields "}"`
    fn parse_struct_def(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Struct)? {
            return Ok(None);
        }

        let name = self.expect_identifier("Expected struct name")?;

        self.expect(&Token::LBrace, "Missing left curly brace in struct definition")?;
        let fields = self.parse_list(Self::parse_field, "Expected field after comma")?;
        self.expect(&Token::RBrace, "Missing right curly brace in struct definition")?;

        Ok(Some(Statement::StructDef(StructDef { name, fields, position })))
    }

    /// Parses a single struct field declaration.
    ///
    /// The rule is: `field := type identifier`
    fn parse_field(&mut self) -> ParseResult<Option<Field>> {
        let Some(declared_type) = self.current_type() else {
            return Ok(None);
        };
        self.advance()?;

        let name = self.expect_identifier("Expected field name")?;

        Ok(Some(Field { declared_type,
                        name }))
    }

    /// Parses a `variant` definition.
    ///
    /// A variant must list at least one member type.
    ///
    /// The rule is: `vnt_def := "variant" identifier "{" type { "," type } "}"`
    fn parse_variant_def(&mut self, position: Position) -> ParseResult<Option<Statement>> {
        if !self.consume_if(&Token::Variant)? {
            return Ok(None);
        }

        let name = self.expect_identifier("Expected variant name")?;

        self.expect(&Token::LBrace, "Missing left curly brace in variant definition")?;

        let types = self.parse_list(Self::parse_type_name, "Expected type after comma")?;
        if types.is_empty() {
            return Err(ParseError::EmptyVariant { position: self.position });
        }

        self.expect(&Token::RBrace, "Missing right curly brace in variant definition")?;

        Ok(Some(Statement::VariantDef(VariantDef { name, types, position })))
    }

    /// Parses a type name where one is optional.
    fn parse_type_name(&mut self) -> ParseResult<Option<Type>> {
        let Some(declared_type) = self.current_type() else {
            return Ok(None);
        };
        self.advance()?;

        Ok(Some(declared_type))
    }
}
