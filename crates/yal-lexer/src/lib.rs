mod token;
mod lexer;

pub use token::{Token, TokenKind, Span, UNARY_PRECEDENCE};
pub use lexer::{Lexer, LexError, scan};
