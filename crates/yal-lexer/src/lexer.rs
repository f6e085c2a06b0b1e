use tracing::{debug, trace};

use crate::token::{Span, Token, TokenKind};

/// Scan a whole source string into tokens, ending with exactly one `Eof`.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Scanner states. Each state consumes input and names the state to run next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Mark a new lexeme and classify its first character.
    Start,
    Punctuation(TokenKind),
    Operator(char),
    Whitespace,
    String,
    /// A literal starting with `0`: hex, binary or octal.
    BasedNumber,
    Decimal,
    Identifier,
    LineComment,
    BlockComment,
    EndOfInput,
    Finished,
}

/// Lexer for yal source code
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    start: usize,
    start_span: Span,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            start_span: Span { line: 1, column: 1 },
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source and return the token list.
    ///
    /// The first lexical error aborts the scan; no partial token list is returned.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut state = State::Start;
        while state != State::Finished {
            state = self.step(state)?;
        }

        debug!(tokens = self.tokens.len(), lines = self.line, "scan complete");
        Ok(std::mem::take(&mut self.tokens))
    }

    fn step(&mut self, state: State) -> Result<State, LexError> {
        match state {
            State::Start => self.classify(),
            State::Punctuation(kind) => {
                self.emit(kind);
                Ok(State::Start)
            }
            State::Operator(ch) => Ok(self.read_operator(ch)),
            State::Whitespace => Ok(State::Start),
            State::String => self.read_string(),
            State::BasedNumber => self.read_based_number(),
            State::Decimal => Ok(self.read_decimal()),
            State::Identifier => Ok(self.read_identifier_or_keyword()),
            State::LineComment => Ok(self.skip_line_comment()),
            State::BlockComment => self.skip_block_comment(),
            State::EndOfInput => {
                self.emit(TokenKind::Eof);
                Ok(State::Finished)
            }
            State::Finished => Ok(State::Finished),
        }
    }

    fn classify(&mut self) -> Result<State, LexError> {
        self.start = self.pos;
        self.start_span = self.span();

        let Some(ch) = self.advance() else {
            return Ok(State::EndOfInput);
        };

        let state = match ch {
            '(' => State::Punctuation(TokenKind::LeftParen),
            ')' => State::Punctuation(TokenKind::RightParen),
            '{' => State::Punctuation(TokenKind::LeftBrace),
            '}' => State::Punctuation(TokenKind::RightBrace),
            '[' => State::Punctuation(TokenKind::LeftBracket),
            ']' => State::Punctuation(TokenKind::RightBracket),
            ',' => State::Punctuation(TokenKind::Comma),
            ':' => State::Punctuation(TokenKind::Colon),
            ';' => State::Punctuation(TokenKind::Semicolon),
            '.' => State::Punctuation(TokenKind::Dot),

            '!' | '=' | '<' | '>' | '-' | '+' | '*' | '/' | '%' | '^' | '|' | '&' => {
                State::Operator(ch)
            }

            ' ' | '\t' | '\r' | '\n' => State::Whitespace,

            '"' => State::String,

            '0' => State::BasedNumber,
            '1'..='9' => State::Decimal,

            'a'..='z' | 'A'..='Z' | '_' => State::Identifier,

            _ => {
                return Err(LexError::IllegalCharacter {
                    ch,
                    line: self.start_span.line,
                    column: self.start_span.column,
                });
            }
        };

        Ok(state)
    }

    // ── Helpers ──────────────────────────────────────────────

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the current character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.pos].iter().collect()
    }

    fn emit(&mut self, kind: TokenKind) {
        let text = self.lexeme();
        self.emit_text(kind, text);
    }

    fn emit_text(&mut self, kind: TokenKind, text: String) {
        let span = self.start_span;
        trace!(?kind, %text, line = span.line, column = span.column, "token");
        self.tokens.push(Token { kind, text, span });
    }

    // ── Compound operators ───────────────────────────────────

    /// Emit the longest operator starting with `first`, or hand over to a
    /// comment state for `//` and `/*`.
    fn read_operator(&mut self, first: char) -> State {
        let kind = match first {
            '!' => {
                if self.eat('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '=' => match self.current() {
                Some('=') => self.take(TokenKind::EqualEqual),
                Some('>') => self.take(TokenKind::FatArrow),
                _ => TokenKind::Equal,
            },
            '<' => match self.current() {
                Some('=') => self.take(TokenKind::LessEqual),
                Some('<') => self.take(TokenKind::ShiftLeft),
                Some('-') => self.take(TokenKind::LeftArrow),
                _ => TokenKind::Less,
            },
            '>' => match self.current() {
                Some('=') => self.take(TokenKind::GreaterEqual),
                Some('>') => self.take(TokenKind::ShiftRight),
                _ => TokenKind::Greater,
            },
            '-' => match self.current() {
                Some('-') => self.take(TokenKind::Decrement),
                Some('=') => self.take(TokenKind::MinusEqual),
                Some('>') => self.take(TokenKind::Arrow),
                _ => TokenKind::Minus,
            },
            '+' => match self.current() {
                Some('+') => self.take(TokenKind::Increment),
                Some('=') => self.take(TokenKind::PlusEqual),
                _ => TokenKind::Plus,
            },
            '*' => {
                if self.eat('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => match self.current() {
                Some('/') => {
                    self.advance();
                    return State::LineComment;
                }
                Some('*') => {
                    self.advance();
                    return State::BlockComment;
                }
                Some('=') => self.take(TokenKind::SlashEqual),
                _ => TokenKind::Slash,
            },
            '^' => {
                if self.eat('=') {
                    TokenKind::CaretEqual
                } else {
                    TokenKind::Caret
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else {
                    TokenKind::Ampersand
                }
            }
            // '%'
            _ => TokenKind::Percent,
        };

        self.emit(kind);
        State::Start
    }

    /// Consume the lookahead character and return `kind`.
    fn take(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    // ── Comments ─────────────────────────────────────────────

    fn skip_line_comment(&mut self) -> State {
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        State::Start
    }

    fn skip_block_comment(&mut self) -> Result<State, LexError> {
        loop {
            match self.current() {
                None => {
                    return Err(LexError::UnterminatedComment {
                        line: self.start_span.line,
                        column: self.start_span.column,
                    });
                }
                Some('*') if self.next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(State::Start);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    // ── String ───────────────────────────────────────────────

    /// Everything up to the next `"` is the literal; there are no escapes.
    /// The lexeme keeps both quotes.
    fn read_string(&mut self) -> Result<State, LexError> {
        loop {
            match self.current() {
                None => {
                    return Err(LexError::UnterminatedString {
                        line: self.start_span.line,
                        column: self.start_span.column,
                    });
                }
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.advance(); // closing quote
        self.emit(TokenKind::String);
        Ok(State::Start)
    }

    // ── Number ───────────────────────────────────────────────

    fn read_based_number(&mut self) -> Result<State, LexError> {
        let (kind, radix, prefixed) = match self.current() {
            Some('x' | 'X') => (TokenKind::Number16, 16, true),
            Some('b' | 'B') => (TokenKind::Number2, 2, true),
            Some('o' | 'O') => (TokenKind::Number8, 8, true),
            _ => (TokenKind::Number8, 8, false),
        };

        if prefixed {
            self.advance();
        }

        let digits = self.skip_digits(radix);
        // the fraction uses the same radix as the integer part
        if self.eat('.') {
            self.skip_digits(radix);
        }
        let trailing = self.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');

        if (prefixed && digits == 0) || trailing > 0 {
            return Err(LexError::MalformedNumber {
                text: self.lexeme(),
                line: self.start_span.line,
                column: self.start_span.column,
            });
        }

        self.emit(kind);
        Ok(State::Start)
    }

    fn read_decimal(&mut self) -> State {
        self.skip_digits(10);
        if self.eat('.') {
            self.skip_digits(10);
        }

        self.emit(TokenKind::Number10);
        State::Start
    }

    fn skip_digits(&mut self, radix: u32) -> usize {
        self.skip_while(|c| c.is_digit(radix))
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }

    // ── Identifier / Keyword ─────────────────────────────────

    fn read_identifier_or_keyword(&mut self) -> State {
        self.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');

        let word = self.lexeme();
        let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier);

        self.emit_text(kind, word);
        State::Start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Lex error at line {line}, column {column}: illegal character '{ch}'")]
    IllegalCharacter {
        ch: char,
        line: usize,
        column: usize,
    },

    #[error("Lex error at line {line}, column {column}: unterminated string literal")]
    UnterminatedString { line: usize, column: usize },

    #[error("Lex error at line {line}, column {column}: unterminated block comment")]
    UnterminatedComment { line: usize, column: usize },

    #[error("Lex error at line {line}, column {column}: malformed number literal '{text}'")]
    MalformedNumber {
        text: String,
        line: usize,
        column: usize,
    },
}

impl LexError {
    pub fn span(&self) -> Span {
        let (line, column) = match self {
            LexError::IllegalCharacter { line, column, .. }
            | LexError::UnterminatedString { line, column }
            | LexError::UnterminatedComment { line, column }
            | LexError::MalformedNumber { line, column, .. } => (*line, *column),
        };
        Span { line, column }
    }
}

#[cfg(test)]
mod tests;
