use tracing::debug;
use yal_lexer::{Span, Token, TokenKind, UNARY_PRECEDENCE};

use crate::ast::*;

mod exprs;
mod stmts;

/// Deepest nesting of statements and expressions the parser accepts.
///
/// Every nested group, block, body or prefix operator costs several stack
/// frames, so unbounded input would overflow the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive-descent parser for yal
///
/// The cursor only moves forward. Decisions use at most one token of
/// lookahead past the current one (`peek_next`).
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens
                .last()
                .map(|t| t.span)
                .unwrap_or(Span { line: 1, column: 1 });
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse all tokens into a Program AST.
    ///
    /// The first error aborts parsing; there is no resynchronization.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        debug!(statements = statements.len(), "parse complete");
        Ok(Program { statements })
    }

    // ── Token navigation ─────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token if it has one of `kinds`.
    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek_kind()) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.check(expected) {
            return Ok(self.advance().clone());
        }
        let found = self.peek();
        Err(ParseError::Expected {
            expected,
            found: found.kind,
            text: found.text.clone(),
            line: found.span.line,
            column: found.span.column,
        })
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let span = self.current_span();
            return Err(ParseError::NestingTooDeep {
                line: span.line,
                column: span.column,
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = self.peek();
        ParseError::Unexpected {
            expected,
            found: found.kind,
            text: found.text.clone(),
            line: found.span.line,
            column: found.span.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error at line {line}, column {column}: expected {expected}, found {found} '{text}'")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        line: usize,
        column: usize,
    },

    #[error("Parse error at line {line}, column {column}: expected {expected}, found {found} '{text}'")]
    Unexpected {
        expected: &'static str,
        found: TokenKind,
        text: String,
        line: usize,
        column: usize,
    },

    #[error("Parse error at line {line}, column {column}: invalid assignment target")]
    InvalidAssignmentTarget { line: usize, column: usize },

    #[error("Parse error at line {line}, column {column}: '{operator}' can only follow a variable")]
    InvalidPostfixOperand {
        operator: String,
        line: usize,
        column: usize,
    },

    #[error(
        "Parse error at line {line}, column {column}: nesting is too deep (maximum {max} levels)",
        max = MAX_NESTING_DEPTH
    )]
    NestingTooDeep { line: usize, column: usize },
}

impl ParseError {
    pub fn span(&self) -> Span {
        let (line, column) = match self {
            ParseError::Expected { line, column, .. }
            | ParseError::Unexpected { line, column, .. }
            | ParseError::InvalidAssignmentTarget { line, column }
            | ParseError::InvalidPostfixOperand { line, column, .. }
            | ParseError::NestingTooDeep { line, column } => (*line, *column),
        };
        Span { line, column }
    }
}
