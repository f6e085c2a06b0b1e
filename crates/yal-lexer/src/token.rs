use std::fmt;

use serde::Serialize;

/// Precedence of prefix unary operators. Binary operators sit below it.
pub const UNARY_PRECEDENCE: u8 = 6;

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// All token kinds in yal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Colon,        // :
    Semicolon,    // ;
    Dot,          // .

    // Arithmetic
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    Increment,    // ++
    Decrement,    // --

    // Compound assignment
    PlusEqual,    // +=
    MinusEqual,   // -=
    StarEqual,    // *=
    SlashEqual,   // /=
    CaretEqual,   // ^=

    // Comparison & assignment
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    // Bitwise
    Ampersand,    // &
    Pipe,         // |
    Caret,        // ^
    ShiftLeft,    // <<
    ShiftRight,   // >>

    // Logical
    AndAnd,       // &&
    OrOr,         // ||

    // Arrows
    Arrow,        // ->
    LeftArrow,    // <-
    FatArrow,     // =>

    // Keywords
    If,
    Else,
    For,
    While,
    Let,
    Return,
    Fn,
    True,
    False,
    Null,
    Switch,
    Goto,
    Type,

    // Literals
    Number2,      // 0b101
    Number8,      // 017, 0o17
    Number10,     // 42, 3.14
    Number16,     // 0x1F
    String,       // "hello"
    Identifier,

    // Special
    Eof,
}

impl TokenKind {
    /// Look up a reserved word. Anything else is an identifier.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "let" => TokenKind::Let,
            "return" => TokenKind::Return,
            "fn" => TokenKind::Fn,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "NULL" => TokenKind::Null,
            "switch" => TokenKind::Switch,
            "goto" => TokenKind::Goto,
            "type" => TokenKind::Type,
            _ => return None,
        };
        Some(kind)
    }

    /// Binding strength of a binary operator, lowest to highest.
    /// Returns `0` for tokens that are not binary operators.
    pub fn precedence(self) -> u8 {
        match self {
            TokenKind::OrOr => 1,
            TokenKind::AndAnd => 2,
            TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => 3,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Pipe | TokenKind::Caret => 4,
            TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::ShiftLeft
            | TokenKind::ShiftRight
            | TokenKind::Ampersand => 5,
            _ => 0,
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number2
                | TokenKind::Number8
                | TokenKind::Number10
                | TokenKind::Number16
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    fn describe(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "left parenthesis",
            TokenKind::RightParen => "right parenthesis",
            TokenKind::LeftBrace => "left brace",
            TokenKind::RightBrace => "right brace",
            TokenKind::LeftBracket => "left bracket",
            TokenKind::RightBracket => "right bracket",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Dot => "dot",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Percent => "percent",
            TokenKind::Increment => "increment",
            TokenKind::Decrement => "decrement",
            TokenKind::PlusEqual => "plus assign",
            TokenKind::MinusEqual => "minus assign",
            TokenKind::StarEqual => "star assign",
            TokenKind::SlashEqual => "slash assign",
            TokenKind::CaretEqual => "xor assign",
            TokenKind::Bang => "bang",
            TokenKind::BangEqual => "not equal",
            TokenKind::Equal => "assignment",
            TokenKind::EqualEqual => "equality",
            TokenKind::Less => "less",
            TokenKind::LessEqual => "less equal",
            TokenKind::Greater => "greater",
            TokenKind::GreaterEqual => "greater equal",
            TokenKind::Ampersand => "ampersand",
            TokenKind::Pipe => "pipe",
            TokenKind::Caret => "xor",
            TokenKind::ShiftLeft => "shift left",
            TokenKind::ShiftRight => "shift right",
            TokenKind::AndAnd => "double ampersand",
            TokenKind::OrOr => "double pipe",
            TokenKind::Arrow => "arrow",
            TokenKind::LeftArrow => "left arrow",
            TokenKind::FatArrow => "fat arrow",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Let => "let",
            TokenKind::Return => "return",
            TokenKind::Fn => "fn",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "NULL",
            TokenKind::Switch => "switch",
            TokenKind::Goto => "goto",
            TokenKind::Type => "type",
            TokenKind::Number2 => "number(binary)",
            TokenKind::Number8 => "number(octal)",
            TokenKind::Number10 => "number(decimal)",
            TokenKind::Number16 => "number(hex)",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}
