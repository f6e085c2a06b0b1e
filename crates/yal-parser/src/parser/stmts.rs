use super::*;

impl Parser {
    // ── Declaration ──────────────────────────────────────────
    // declaration := "let" varDecl | "type" typeDef | statement

    pub(super) fn declaration(&mut self) -> Result<Statement, ParseError> {
        match self.peek_kind() {
            TokenKind::Let => self.var_statement(),
            TokenKind::Type => self.type_definition(),
            _ => self.statement(),
        }
    }

    // ── Statement ────────────────────────────────────────────
    // statement := fnDecl | forStmt | whileStmt | ifStmt | block | exprStmt

    fn statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(|parser| match parser.peek_kind() {
            TokenKind::Fn => parser.fn_declaration(),
            TokenKind::For => parser.for_statement(),
            TokenKind::While => parser.while_statement(),
            TokenKind::If => parser.if_statement(),
            TokenKind::LeftBrace => Ok(Statement::Block(parser.block()?)),
            _ => parser.expression_statement(),
        })
    }

    // ── VarStatement ─────────────────────────────────────────
    // let name (: type)? (= expr)? ;

    fn var_statement(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::Let)?;

        let mut decl = self.binding()?;
        decl.span = span;
        if self.matches(&[TokenKind::Equal]) {
            decl.initializer = Some(self.expression()?);
        }

        self.consume(TokenKind::Semicolon)?;
        Ok(Statement::VarDecl(decl))
    }

    /// `name (: type)?`, shared by `let` and function parameters.
    fn binding(&mut self) -> Result<VarDecl, ParseError> {
        let name_tok = self.consume(TokenKind::Identifier)?;
        let type_annotation = self.type_annotation()?;

        Ok(VarDecl {
            name: name_tok.text,
            type_annotation,
            initializer: None,
            span: name_tok.span,
        })
    }

    fn type_annotation(&mut self) -> Result<Option<String>, ParseError> {
        if !self.matches(&[TokenKind::Colon]) {
            return Ok(None);
        }
        let type_tok = self.consume(TokenKind::Identifier)?;
        Ok(Some(type_tok.text))
    }

    // ── TypeDefinition ───────────────────────────────────────
    // type Name = Underlying ;

    fn type_definition(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::Type)?;
        let name_tok = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::Equal)?;
        let underlying_tok = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::Semicolon)?;

        Ok(Statement::TypeDef {
            name: name_tok.text,
            underlying: underlying_tok.text,
            span,
        })
    }

    // ── ExpressionStatement ──────────────────────────────────
    // expr ;   OR   expr }   (trailing expression returns its value)

    fn expression_statement(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        let expr = self.expression()?;

        if self.check(TokenKind::RightBrace) {
            let expr = match expr {
                Expression::Return { .. } => expr,
                value => Expression::Return {
                    span: value.span(),
                    value: Some(Box::new(value)),
                },
            };
            return Ok(Statement::Expression { expr, span });
        }

        self.consume(TokenKind::Semicolon)?;
        Ok(Statement::Expression { expr, span })
    }

    // ── BlockStatement ───────────────────────────────────────
    // { declaration* }

    fn block(&mut self) -> Result<Block, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        self.consume(TokenKind::RightBrace)?;
        Ok(Block { statements, span })
    }

    // ── IfStatement ──────────────────────────────────────────
    // if (cond) stmt (else stmt)?

    fn if_statement(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::If)?;
        self.consume(TokenKind::LeftParen)?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen)?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            span,
        }))
    }

    // ── WhileStatement ───────────────────────────────────────
    // while (cond) stmt

    fn while_statement(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::While)?;
        self.consume(TokenKind::LeftParen)?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen)?;
        let body = Box::new(self.statement()?);

        Ok(Statement::While(WhileStmt {
            condition,
            body,
            span,
        }))
    }

    // ── ForStatement ─────────────────────────────────────────
    // for (init; cond; increment) stmt, every clause optional

    fn for_statement(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::For)?;
        self.consume(TokenKind::LeftParen)?;

        // init clauses consume their own ';'
        let initializer = if self.matches(&[TokenKind::Semicolon]) {
            None
        } else if self.check(TokenKind::Let) {
            Some(Box::new(self.var_statement()?))
        } else {
            Some(Box::new(self.expression_statement()?))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon)?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen)?;

        let body = Box::new(self.statement()?);

        Ok(Statement::For(ForStmt {
            initializer,
            condition,
            increment,
            body,
            span,
        }))
    }

    // ── FnDeclaration ────────────────────────────────────────
    // fn name(param (, param)*) (: type)? stmt

    fn fn_declaration(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.consume(TokenKind::Fn)?;
        let name_tok = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.binding()?);
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        let return_type = self.type_annotation()?;
        let body = Box::new(self.statement()?);

        Ok(Statement::FnDecl(FnDecl {
            name: name_tok.text,
            params,
            return_type,
            body,
            span,
        }))
    }
}
