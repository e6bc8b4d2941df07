use crate::{
    ast::{BinaryOperator, Expression},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a disjunction, the loosest-binding expression level.
    ///
    /// Handles the left-associative, chaining `or` operator.
    ///
    /// The rule is: `disjunction := conjunction { "or" conjunction }`
    ///
    /// # Returns
    /// - `Ok(Some(expression))` if an expression was parsed.
    /// - `Ok(None)` if no expression starts at the current token.
    pub(in crate::interpreter::parser) fn parse_disjunction(&mut self)
                                                            -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_conjunction()? else {
            return Ok(None);
        };

        while self.consume_if(&Token::Or)? {
            let right =
                self.parse_conjunction()?
                    .ok_or_else(|| self.syntax_error("Expected expression after 'or' keyword"))?;

            left = Expression::Binary { left: Box::new(left),
                                        op: BinaryOperator::Or,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }

    /// Parses a conjunction.
    ///
    /// Handles the left-associative, chaining `and` operator.
    ///
    /// The rule is: `conjunction := equality { "and" equality }`
    fn parse_conjunction(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_equality()? else {
            return Ok(None);
        };

        while self.consume_if(&Token::And)? {
            let right =
                self.parse_equality()?
                    .ok_or_else(|| self.syntax_error("Expected expression after 'and' keyword"))?;

            left = Expression::Binary { left: Box::new(left),
                                        op: BinaryOperator::And,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }

    /// Parses an equality comparison.
    ///
    /// At most one `==` or `!=` is allowed per level; equality does not
    /// chain, so parsing `a == b == c` stops after the first comparison and
    /// the caller fails on the leftover operator.
    ///
    /// The rule is: `equality := relation [ ("==" | "!=") relation ]`
    fn parse_equality(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_relation()? else {
            return Ok(None);
        };

        if let Some(op) = self.current.as_ref().and_then(equality_operator) {
            self.advance()?;

            let right = self.parse_relation()?.ok_or_else(|| {
                            self.syntax_error("Expected expression after (not)equal operator")
                        })?;

            left = Expression::Binary { left: Box::new(left),
                                        op,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }

    /// Parses a relational comparison.
    ///
    /// At most one of `<`, `<=`, `>`, `>=` is allowed per level; relations
    /// do not chain.
    ///
    /// The rule is: `relation := additive [ ("<" | "<=" | ">" | ">=") additive ]`
    fn parse_relation(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_additive()? else {
            return Ok(None);
        };

        if let Some(op) = self.current.as_ref().and_then(relational_operator) {
            self.advance()?;

            let right = self.parse_additive()?.ok_or_else(|| {
                            self.syntax_error("Expected expression after relation operator")
                        })?;

            left = Expression::Binary { left: Box::new(left),
                                        op,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }

    /// Parses addition and subtraction expressions.
    ///
    /// Handles the left-associative binary operators `+` and `-`.
    ///
    /// The rule is: `additive := multiplicative { ("+" | "-") multiplicative }`
    fn parse_additive(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_multiplicative()? else {
            return Ok(None);
        };

        while let Some(op) = self.current.as_ref().and_then(additive_operator) {
            self.advance()?;

            let right = self.parse_multiplicative()?.ok_or_else(|| {
                            self.syntax_error("Expected expression after additive operator")
                        })?;

            left = Expression::Binary { left: Box::new(left),
                                        op,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }

    /// Parses multiplication and division expressions.
    ///
    /// Handles the left-associative binary operators `*` and `/`.
    ///
    /// The rule is: `multiplicative := unary { ("*" | "/") unary }`
    fn parse_multiplicative(&mut self) -> ParseResult<Option<Expression>> {
        let position = self.position;

        let Some(mut left) = self.parse_unary()? else {
            return Ok(None);
        };

        while let Some(op) = self.current.as_ref().and_then(multiplicative_operator) {
            self.advance()?;

            let right = self.parse_unary()?.ok_or_else(|| {
                            self.syntax_error("Expected expression after multiplicative operator")
                        })?;

            left = Expression::Binary { left: Box::new(left),
                                        op,
                                        right: Box::new(right),
                                        position };
        }

        Ok(Some(left))
    }
}

/// Maps an equality token to its operator.
const fn equality_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Maps a relational token to its operator.
const fn relational_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Maps an additive token to its operator.
const fn additive_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        _ => None,
    }
}

/// Maps a multiplicative token to its operator.
const fn multiplicative_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Star => Some(BinaryOperator::Multiply),
        Token::Slash => Some(BinaryOperator::Divide),
        _ => None,
    }
}
