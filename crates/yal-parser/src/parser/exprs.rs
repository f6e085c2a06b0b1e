use super::*;

impl Parser {
    // ── Expression ───────────────────────────────────────────
    // expression := "return" expression? | assignment

    pub(super) fn expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(|parser| {
            if parser.check(TokenKind::Return) {
                return parser.return_expression();
            }
            parser.assignment()
        })
    }

    fn return_expression(&mut self) -> Result<Expression, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::Return)?;

        let value = match self.peek_kind() {
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof => None,
            _ => Some(Box::new(self.expression()?)),
        };

        Ok(Expression::Return { value, span })
    }

    // assignment := logicOr ( "=" assignment )?

    fn assignment(&mut self) -> Result<Expression, ParseError> {
        let target = self.logic_or()?;

        if !self.check(TokenKind::Equal) {
            return Ok(target);
        }

        let equals = self.advance().span;
        let Expression::Variable { name, span } = target else {
            return Err(ParseError::InvalidAssignmentTarget {
                line: equals.line,
                column: equals.column,
            });
        };

        let value = self.nested(Self::assignment)?;
        Ok(Expression::Assign {
            name,
            value: Box::new(value),
            span,
        })
    }

    // ── Binary tiers ─────────────────────────────────────────
    // Binding strength comes from TokenKind::precedence():
    // || (1) < && (2) < equality/relational (3) < additive (4) < multiplicative (5)
    //    < prefix unary (UNARY_PRECEDENCE)

    fn logic_or(&mut self) -> Result<Expression, ParseError> {
        self.logical_tier(LogicalOp::Or, Self::logic_and)
    }

    fn logic_and(&mut self) -> Result<Expression, ParseError> {
        self.logical_tier(LogicalOp::And, Self::equality)
    }

    fn equality(&mut self) -> Result<Expression, ParseError> {
        self.binary_tier(3, Self::term)
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        self.binary_tier(4, Self::factor)
    }

    // the tightest binary tier sits directly below prefix operators
    fn factor(&mut self) -> Result<Expression, ParseError> {
        self.binary_tier(UNARY_PRECEDENCE - 1, Self::unary)
    }

    fn logical_tier(
        &mut self,
        operator: LogicalOp,
        operand: fn(&mut Self) -> Result<Expression, ParseError>,
    ) -> Result<Expression, ParseError> {
        let mut left = operand(self)?;

        while LogicalOp::from_token_kind(self.peek_kind()) == Some(operator) {
            let span = self.advance().span;
            let right = operand(self)?;
            left = Expression::Logical {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn binary_tier(
        &mut self,
        precedence: u8,
        operand: fn(&mut Self) -> Result<Expression, ParseError>,
    ) -> Result<Expression, ParseError> {
        let mut left = operand(self)?;

        while let Some(operator) = self.binary_operator(precedence) {
            let span = self.advance().span;
            let right = operand(self)?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn binary_operator(&self, precedence: u8) -> Option<BinaryOp> {
        let kind = self.peek_kind();
        if kind.precedence() != precedence {
            return None;
        }
        BinaryOp::from_token_kind(kind)
    }

    // ── Unary ────────────────────────────────────────────────
    // unary := ( "!" | "-" | "++" | "--" ) unary | postfixOrPrimary

    fn unary(&mut self) -> Result<Expression, ParseError> {
        let Some(operator) = UnaryOp::from_token_kind(self.peek_kind()) else {
            return self.postfix_or_primary();
        };

        let span = self.advance().span;
        let operand = self.nested(Self::unary)?;

        Ok(Expression::UnaryPrefix {
            operator,
            operand: Box::new(operand),
            span,
        })
    }

    // postfixOrPrimary := primary ( "++" | "--" )?   -- postfix only on a variable

    fn postfix_or_primary(&mut self) -> Result<Expression, ParseError> {
        let expr = self.primary()?;

        let operator = match self.peek_kind() {
            TokenKind::Increment => UnaryOp::Increment,
            TokenKind::Decrement => UnaryOp::Decrement,
            _ => return Ok(expr),
        };

        let op_tok = self.advance().clone();
        if !matches!(expr, Expression::Variable { .. }) {
            return Err(ParseError::InvalidPostfixOperand {
                operator: op_tok.text,
                line: op_tok.span.line,
                column: op_tok.span.column,
            });
        }

        Ok(Expression::UnaryPostfix {
            operator,
            span: expr.span(),
            operand: Box::new(expr),
        })
    }

    // ── Primary ──────────────────────────────────────────────
    // primary := NUMBER | STRING | true | false | NULL
    //          | IDENT "(" args ")" | IDENT | "(" expression ")"

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let kind = self.peek_kind();

        if kind.is_literal() {
            let token = self.advance().clone();
            return Ok(Expression::Literal(token));
        }

        match kind {
            TokenKind::Identifier if self.peek_next().kind == TokenKind::LeftParen => self.call(),
            TokenKind::Identifier => {
                let tok = self.advance().clone();
                Ok(Expression::Variable {
                    name: tok.text,
                    span: tok.span,
                })
            }
            TokenKind::LeftParen => {
                let span = self.advance().span;
                let inner = self.expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(Expression::Grouping {
                    inner: Box::new(inner),
                    span,
                })
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    // call := IDENT "(" ( expression ( "," expression )* )? ")"

    fn call(&mut self) -> Result<Expression, ParseError> {
        let name_tok = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::Call {
            name: name_tok.text,
            args,
            span: name_tok.span,
        })
    }
}
