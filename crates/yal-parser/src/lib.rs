pub mod ast;
mod parser;

pub use ast::*;
pub use parser::{MAX_NESTING_DEPTH, ParseError, Parser};

use yal_lexer::{LexError, Lexer, Span};

/// Either stage of the front end failed. The first error is always fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span(),
            SyntaxError::Parse(err) => err.span(),
        }
    }
}

/// Scan and parse a whole source string.
pub fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    Ok(program)
}
