use crate::{
    ast::{Argument, Constant, Expression, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses an optional unary prefix.
    ///
    /// At most one leading `-` or `not` is allowed; prefixes do not stack,
    /// so `--x` is a syntax error.
    ///
    /// The rule is: `unary := [ "-" | "not" ] type_expression`
    ///
    /// # Returns
    /// - `Ok(Some(expression))` if an expression was parsed.
    /// - `Ok(None)` if no expression starts at the current token.
    pub(in crate::interpreter::parser) fn parse_unary(&mut self)
                                                      -> ParseResult<Option<Expression>> {
        let position = self.position;

        let op = match &self.current {
            Some(Token::Minus) => Some(UnaryOperator::Negate),
            Some(Token::Not) => Some(UnaryOperator::Not),
            _ => None,
        };

        let Some(op) = op else {
            return self.parse_type_expression();
        };
        self.advance()?;

        let expr =
            self.parse_type_expression()?
                .ok_or_else(|| self.syntax_error("Expected expression after unary operator"))?;

        Ok(Some(Expression::Unary { op,
                                    expr: Box::new(expr),
                                    position }))
    }

    /// Parses an optional `as` conversion or `is` type check suffix.
    ///
    /// At most one suffix is allowed, so `x as int is int` is a syntax
    /// error. The node's position is the operator keyword itself.
    ///
    /// The rule is: `type_expression := field_access [ ("as" | "is") type ]`
    fn parse_type_expression(&mut self) -> ParseResult<Option<Expression>> {
        let Some(expr) = self.parse_field_access()? else {
            return Ok(None);
        };

        let is_check = match &self.current {
            Some(Token::As) => false,
            Some(Token::Is) => true,
            _ => return Ok(Some(expr)),
        };

        let position = self.position;
        self.advance()?;

        let target = self.current_type()
                         .ok_or_else(|| self.syntax_error("Expected type after is/as keyword"))?;
        self.advance()?;

        let expr = Box::new(expr);
        if is_check {
            return Ok(Some(Expression::TypeCheck { expr, target, position }));
        }

        Ok(Some(Expression::Conversion { expr, target, position }))
    }

    /// Parses a field access chain.
    ///
    /// Every node of the chain keeps the base expression's position.
    ///
    /// The rule is: `field_access := primary { "." identifier }`
    fn parse_field_access(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut expr) = self.parse_primary()? else {
            return Ok(None);
        };

        while self.consume_if(&Token::Dot)? {
            let field = self.expect_identifier("Expected field name after dot operator")?;

            expr = Expression::FieldAccess { base: Box::new(expr),
                                             field,
                                             position };
        }

        Ok(Some(expr))
    }

    /// Parses a primary expression.
    ///
    /// The rule is: `primary := "(" expression ")" | constant | call_or_var`
    fn parse_primary(&mut self) -> ParseResult<Option<Expression>> {
        if self.consume_if(&Token::LParen)? {
            let expr = self.parse_expression()?;
            self.expect(&Token::RParen, "Expected right parenthesis after nested expression")?;
            return Ok(expr);
        }

        if let Some(constant) = self.parse_constant()? {
            return Ok(Some(constant));
        }

        self.parse_call_or_variable()
    }

    /// Parses a literal constant.
    fn parse_constant(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let value = match &self.current {
            Some(Token::Int(v)) => Constant::Int(*v),
            Some(Token::Float(v)) => Constant::Float(*v),
            Some(Token::Bool(v)) => Constant::Bool(*v),
            Some(Token::Str(v)) => Constant::Str(v.clone()),
            _ => return Ok(None),
        };
        self.advance()?;

        Ok(Some(Expression::Constant { value, position }))
    }

    /// Parses a variable access or function call expression.
    ///
    /// The rule is: `call_or_var := identifier [ "(" arguments ")" ]`
    fn parse_call_or_variable(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(Token::Identifier(name)) = &self.current else {
            return Ok(None);
        };
        let name = name.clone();
        self.advance()?;

        if let Some(arguments) = self.parse_call_args()? {
            return Ok(Some(Expression::FunctionCall { name,
                                                      arguments,
                                                      position }));
        }

        Ok(Some(Expression::Variable { name, position }))
    }

    /// Parses a parenthesized call argument list.
    ///
    /// Declines without consuming input when the current token is not a
    /// left parenthesis, so an identifier can fall back to a plain variable
    /// access.
    ///
    /// The rule is: `arguments := [ argument { "," argument } ]`
    pub(in crate::interpreter::parser) fn parse_call_args(&mut self)
                                                          -> ParseResult<Option<Vec<Argument>>> {
        if !self.consume_if(&Token::LParen)? {
            return Ok(None);
        }

        let arguments = self.parse_list(Self::parse_argument, "Expected argument after comma")?;

        self.expect(&Token::RParen, "Missing right parenthesis after function call arguments")?;

        Ok(Some(arguments))
    }

    /// Parses a single call argument with an optional `ref` marker.
    ///
    /// The rule is: `argument := [ "ref" ] expression`
    fn parse_argument(&mut self) -> ParseResult<Option<Argument>> {
        let by_ref = self.consume_if(&Token::Ref)?;

        let Some(value) = self.parse_expression()? else {
            if by_ref {
                return Err(self.syntax_error("Expected function call argument expression"));
            }
            return Ok(None);
        };

        Ok(Some(Argument { value, by_ref }))
    }
}
