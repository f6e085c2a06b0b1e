use super::*;
use crate::token::TokenKind;

fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize().expect("lexer should succeed")
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].text, "");
}

#[test]
fn whitespace_only() {
    let tokens = lex("  \t\r\n  ");
    assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
}

#[test]
fn decimal_integer() {
    let tokens = lex("42");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number10, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "42");
}

#[test]
fn decimal_fraction() {
    let tokens = lex("3.14");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number10, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "3.14");
}

#[test]
fn second_dot_starts_a_new_token() {
    let tokens = lex("1.2.3");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Number10, TokenKind::Dot, TokenKind::Number10, TokenKind::Eof]
    );
    assert_eq!(tokens[0].text, "1.2");
    assert_eq!(tokens[2].text, "3");
}

#[test]
fn hex_literal() {
    let tokens = lex("0x1F");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number16, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0x1F");
}

#[test]
fn binary_literal() {
    let tokens = lex("0b101");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number2, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0b101");
}

#[test]
fn octal_with_leading_zero() {
    let tokens = lex("017");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number8, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "017");
}

#[test]
fn octal_with_prefix() {
    let tokens = lex("0o17");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number8, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0o17");
}

#[test]
fn lone_zero_is_octal() {
    let tokens = lex("0");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number8, TokenKind::Eof]);
}

#[test]
fn hex_fraction() {
    let tokens = lex("0x1.8");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number16, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0x1.8");
}

#[test]
fn octal_fraction() {
    let tokens = lex("017.4");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number8, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "017.4");
}

#[test]
fn binary_fraction() {
    let tokens = lex("0b1.1");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number2, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0b1.1");
}

#[test]
fn leading_zero_fraction_is_octal() {
    let tokens = lex("0.5");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number8, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "0.5");
}

#[test]
fn trailing_dot_is_part_of_the_literal() {
    let tokens = lex("0. 1.");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Number8, TokenKind::Number10, TokenKind::Eof]
    );
    assert_eq!(tokens[0].text, "0.");
    assert_eq!(tokens[1].text, "1.");
}

#[test]
fn second_dot_after_based_fraction_is_separate() {
    let tokens = lex("0x1.8.2");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Number16,
            TokenKind::Dot,
            TokenKind::Number10,
            TokenKind::Eof
        ]
    );
    assert_eq!(tokens[0].text, "0x1.8");
}

#[test]
fn malformed_based_literals() {
    for src in ["0x", "0b", "0b102", "08", "0xfg", "0o9", "0.9", "0b1.2", "0x."] {
        let err = Lexer::new(src).tokenize().unwrap_err();
        assert!(
            matches!(err, LexError::MalformedNumber { .. }),
            "expected malformed number for {src:?}, got {err:?}"
        );
    }
}

#[test]
fn string_literal() {
    let tokens = lex("\"hello\"");
    assert_eq!(kinds(&tokens), vec![TokenKind::String, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "\"hello\"");
}

#[test]
fn empty_string_literal() {
    let tokens = lex("\"\"");
    assert_eq!(kinds(&tokens), vec![TokenKind::String, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "\"\"");
}

#[test]
fn backslash_in_string_is_literal() {
    let tokens = lex(r#""a\nb""#);
    assert_eq!(tokens[0].text, r#""a\nb""#);
}

#[test]
fn unclosed_string_error() {
    let err = Lexer::new("let s = \"hello").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { line: 1, column: 9 });
}

#[test]
fn keywords() {
    let tokens = lex("if else for while let return fn true false NULL switch goto type");
    let expected = vec![
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Let,
        TokenKind::Return,
        TokenKind::Fn,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Switch,
        TokenKind::Goto,
        TokenKind::Type,
        TokenKind::Eof,
    ];
    assert_eq!(kinds(&tokens), expected);
}

#[test]
fn keywords_are_case_sensitive() {
    let tokens = lex("null If");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn identifiers() {
    let tokens = lex("foo _bar my_var123");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[0].text, "foo");
    assert_eq!(tokens[1].text, "_bar");
    assert_eq!(tokens[2].text, "my_var123");
}

#[test]
fn identifier_starting_with_keyword_prefix() {
    let tokens = lex("format lettuce");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn punctuation() {
    let tokens = lex("( ) { } [ ] , : ; .");
    let expected = vec![
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::Semicolon,
        TokenKind::Dot,
        TokenKind::Eof,
    ];
    assert_eq!(kinds(&tokens), expected);
}

#[test]
fn single_char_operators() {
    let tokens = lex("+ - * / % ^ | & ! = < >");
    let expected = vec![
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Caret,
        TokenKind::Pipe,
        TokenKind::Ampersand,
        TokenKind::Bang,
        TokenKind::Equal,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::Eof,
    ];
    assert_eq!(kinds(&tokens), expected);
}

#[test]
fn double_char_operators() {
    let tokens = lex("== != <= << <- >= >> -- -= -> ++ += *= /= ^= || && =>");
    let expected = vec![
        TokenKind::EqualEqual,
        TokenKind::BangEqual,
        TokenKind::LessEqual,
        TokenKind::ShiftLeft,
        TokenKind::LeftArrow,
        TokenKind::GreaterEqual,
        TokenKind::ShiftRight,
        TokenKind::Decrement,
        TokenKind::MinusEqual,
        TokenKind::Arrow,
        TokenKind::Increment,
        TokenKind::PlusEqual,
        TokenKind::StarEqual,
        TokenKind::SlashEqual,
        TokenKind::CaretEqual,
        TokenKind::OrOr,
        TokenKind::AndAnd,
        TokenKind::FatArrow,
        TokenKind::Eof,
    ];
    assert_eq!(kinds(&tokens), expected);
    assert_eq!(tokens[3].text, "<<");
}

#[test]
fn compound_operators_are_greedy() {
    let tokens = lex("a+++b");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::Increment,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn line_comment_yields_no_token() {
    let tokens = lex("// line comment\n");
    assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
}

#[test]
fn line_comment_at_end_of_input() {
    let tokens = lex("x // trailing");
    assert_eq!(kinds(&tokens), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn block_comment_yields_no_token() {
    let tokens = lex("/* a\nb */");
    assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
    assert_eq!(tokens[0].span.line, 2);
}

#[test]
fn block_comment_advances_line_tracking() {
    let tokens = lex("/* one\ntwo\nthree */ x");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].span, Span { line: 3, column: 10 });
}

#[test]
fn block_comment_with_stars() {
    let tokens = lex("/** doc **/ y");
    assert_eq!(kinds(&tokens), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn unterminated_block_comment_error() {
    let err = Lexer::new("x /* never closed").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedComment { line: 1, column: 3 });
}

#[test]
fn slash_equal_is_not_a_comment() {
    let tokens = lex("a /= 2");
    assert_eq!(tokens[1].kind, TokenKind::SlashEqual);
}

#[test]
fn illegal_character_error() {
    let err = Lexer::new("let x = 1;\n  @").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::IllegalCharacter {
            ch: '@',
            line: 2,
            column: 3,
        }
    );
    assert_eq!(err.span(), Span { line: 2, column: 3 });
}

#[test]
fn non_ascii_letter_is_illegal() {
    let result = Lexer::new("é").tokenize();
    assert!(matches!(result, Err(LexError::IllegalCharacter { ch: 'é', .. })));
}

#[test]
fn span_tracking() {
    let tokens = lex("let a\n  = 1;");
    assert_eq!(tokens[0].span, Span { line: 1, column: 1 });
    assert_eq!(tokens[1].span, Span { line: 1, column: 5 });
    assert_eq!(tokens[2].span, Span { line: 2, column: 3 });
    assert_eq!(tokens[3].span, Span { line: 2, column: 5 });
    assert_eq!(tokens[4].span, Span { line: 2, column: 6 });
}

#[test]
fn multiline_string_advances_line() {
    let tokens = lex("\"a\nb\" c");
    assert_eq!(tokens[0].text, "\"a\nb\"");
    assert_eq!(tokens[1].span, Span { line: 2, column: 4 });
}

#[test]
fn scan_free_function_matches_lexer() {
    let src = "fn f(a: int): int { a }";
    assert_eq!(scan(src).unwrap(), lex(src));
}

#[test]
fn precedence_table() {
    assert_eq!(TokenKind::OrOr.precedence(), 1);
    assert_eq!(TokenKind::AndAnd.precedence(), 2);
    assert_eq!(TokenKind::EqualEqual.precedence(), 3);
    assert_eq!(TokenKind::GreaterEqual.precedence(), 3);
    assert_eq!(TokenKind::Pipe.precedence(), 4);
    assert_eq!(TokenKind::Caret.precedence(), 4);
    assert_eq!(TokenKind::Percent.precedence(), 5);
    assert_eq!(TokenKind::ShiftRight.precedence(), 5);
    assert_eq!(TokenKind::Ampersand.precedence(), 5);
    assert_eq!(TokenKind::Equal.precedence(), 0);
    assert_eq!(TokenKind::Identifier.precedence(), 0);
    assert!(crate::UNARY_PRECEDENCE > TokenKind::Star.precedence());
}
