//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, logical operators and identifiers
//! - Numeric literals in every base and format
//! - String literals with escape sequences, and doc strings
//! - Operators, doubled and compound forms
//! - Comments
//! - Error cases

use super::{
    lexer::{tokenize, Lexer},
    tokens::{NumFlags, Operator, Token, TokenKind, OPERATOR_LOOKUP, RESERVED_LOOKUP},
};
use crate::{errors::errors::ErrorImpl, Position};

fn scan(source: &str) -> Vec<Token> {
    tokenize(source, Some("test.ail".to_string())).unwrap()
}

/// Scans `source`, asserting it is exactly one token followed by EOF.
fn scan_single(source: &str) -> Token {
    let mut tokens = scan(source);
    assert_eq!(tokens.len(), 2, "expected one token for {:?}: {:?}", source, tokens);
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    tokens.remove(0)
}

fn scan_error(source: &str) -> ErrorImpl {
    tokenize(source, Some("test.ail".to_string()))
        .unwrap_err()
        .kind()
        .clone()
}

#[test]
fn test_empty_and_blank_sources() {
    for source in ["", "\n", "\r", " \t\r\n  "] {
        let tokens = scan(source);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EOF);
    }
}

#[test]
fn test_eof_repeats_past_end() {
    let mut lexer = Lexer::new("x", None);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = scan("foo bar_baz _underscore CamelCase");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_baz");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_han_identifier() {
    let token = scan_single("我命由我不由天");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.value, "我命由我不由天");
}

#[test]
fn test_identifier_stops_at_digit() {
    let tokens = scan("x1");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "1");
}

#[test]
fn test_every_keyword() {
    for (word, kind) in RESERVED_LOOKUP.iter() {
        let token = scan_single(word);
        assert_eq!(token.kind, *kind, "keyword {}", word);
        assert_eq!(token.value, *word);
        assert!(kind.is_keyword());
    }
}

#[test]
fn test_logical_words_are_operators() {
    for (word, op) in [("and", Operator::And), ("or", Operator::Or), ("not", Operator::Not)] {
        let token = scan_single(word);
        assert_eq!(token.kind, TokenKind::Operator);
        assert_eq!(token.op, Some(op));
    }

    assert_eq!(scan_single("android").kind, TokenKind::Identifier);
}

#[test]
fn test_every_operator_spelling() {
    for (spelling, op) in OPERATOR_LOOKUP.iter() {
        let token = scan_single(spelling);
        assert_eq!(token.kind, TokenKind::Operator, "operator {}", spelling);
        assert_eq!(token.op, Some(*op), "operator {}", spelling);
        assert_eq!(token.value, *spelling);
    }
}

#[test]
fn test_doubled_before_compound() {
    let ops: Vec<Option<Operator>> = scan("** **= * *= << <<= <= < >> >>= >= > == = != ~=")
        .iter()
        .map(|token| token.op)
        .collect();

    assert_eq!(
        ops,
        vec![
            Some(Operator::Power),
            Some(Operator::AssiPower),
            Some(Operator::Mult),
            Some(Operator::AssiMult),
            Some(Operator::Lshift),
            Some(Operator::AssiLshift),
            Some(Operator::Leq),
            Some(Operator::Lth),
            Some(Operator::Rshift),
            Some(Operator::AssiRshift),
            Some(Operator::Geq),
            Some(Operator::Gth),
            Some(Operator::Eq),
            Some(Operator::Assign),
            Some(Operator::Ueq),
            Some(Operator::Bng),
            Some(Operator::Assign),
            None,
        ]
    );
}

#[test]
fn test_compound_codes_use_fixed_offset() {
    for op in [
        Operator::Mult,
        Operator::Divi,
        Operator::Mod,
        Operator::Xor,
        Operator::Band,
        Operator::Bor,
        Operator::Lshift,
        Operator::Rshift,
        Operator::Plus,
        Operator::Sub,
        Operator::Power,
    ] {
        let compound = op.compound().unwrap();
        assert_eq!(compound.code(), op.code() + 22);
        assert!(compound.is_assignment());
        assert_eq!(compound.spelling(), format!("{}=", op.spelling()));
    }

    assert_eq!(Operator::Bng.compound(), None);
    assert_eq!(Operator::Eq.compound(), None);
}

#[test]
fn test_precedence_table() {
    assert_eq!(Operator::Assign.precedence(), Some(10));
    assert_eq!(Operator::AssiLshift.precedence(), Some(10));
    assert_eq!(Operator::Or.precedence(), Some(30));
    assert_eq!(Operator::And.precedence(), Some(40));
    assert_eq!(Operator::Bor.precedence(), Some(50));
    assert_eq!(Operator::Xor.precedence(), Some(60));
    assert_eq!(Operator::Band.precedence(), Some(70));
    assert_eq!(Operator::Ueq.precedence(), Some(80));
    assert_eq!(Operator::Geq.precedence(), Some(90));
    assert_eq!(Operator::Rshift.precedence(), Some(100));
    assert_eq!(Operator::Sub.precedence(), Some(110));
    assert_eq!(Operator::Mult.precedence(), Some(120));
    assert_eq!(Operator::Divi.precedence(), Some(130));
    assert_eq!(Operator::Mod.precedence(), Some(140));
    assert_eq!(Operator::Power.precedence(), Some(150));
    assert_eq!(Operator::Not.precedence(), None);
    assert_eq!(Operator::Bng.precedence(), None);
}

#[test]
fn test_punctuation() {
    let kinds: Vec<TokenKind> = scan("( ) [ ] { } , ; . : @").iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::At,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_integer() {
    let token = scan_single("726");
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.num_base, 10);
    assert_eq!(token.num_flags, NumFlags::INTEGER);
    assert_eq!(token.value, "726");
    assert_eq!(token.num_exponent, None);
}

#[test]
fn test_float() {
    let token = scan_single("7.26");
    assert_eq!(token.num_base, 10);
    assert_eq!(token.num_flags, NumFlags::FLOAT);
    assert_eq!(token.value, "7.26");

    let token = scan_single("0.5");
    assert!(token.num_flags.is_float());
    assert_eq!(token.value, "0.5");
}

#[test]
fn test_second_dot_is_error() {
    assert!(matches!(scan_error("7.2.6"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("0.1.2"), ErrorImpl::InvalidNumber { .. }));
}

#[test]
fn test_scientific() {
    let token = scan_single("10e26");
    assert!(token.num_flags.is_scientific());
    assert!(token.num_flags.is_integer());
    assert_eq!(token.value, "10");
    assert_eq!(token.num_exponent.as_deref(), Some("26"));

    let token = scan_single("2.5E-3");
    assert_eq!(token.num_flags, NumFlags::FLOAT | NumFlags::SCIENTIFIC);
    assert_eq!(token.value, "2.5");
    assert_eq!(token.num_exponent.as_deref(), Some("-3"));

    let token = scan_single("0e5");
    assert_eq!(token.value, "0");
    assert_eq!(token.num_exponent.as_deref(), Some("5"));
}

#[test]
fn test_bad_exponents() {
    assert!(matches!(scan_error("1e5e6"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("1e"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("1e-"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("1e5.0"), ErrorImpl::InvalidNumber { .. }));
}

#[test]
fn test_minus_outside_exponent_is_operator() {
    let tokens = scan("5-3");
    assert_eq!(tokens[0].value, "5");
    assert!(tokens[1].is_operator(Operator::Sub));
    assert_eq!(tokens[2].value, "3");

    let tokens = scan("1e-5-2");
    assert_eq!(tokens[0].num_exponent.as_deref(), Some("-5"));
    assert!(tokens[1].is_operator(Operator::Sub));
}

#[test]
fn test_prefixed_bases() {
    let token = scan_single("0xcafebabe");
    assert_eq!(token.num_base, 16);
    assert_eq!(token.value, "cafebabe");
    assert!(token.num_flags.is_integer());

    let token = scan_single("0o1777");
    assert_eq!(token.num_base, 8);
    assert_eq!(token.value, "1777");

    let token = scan_single("0b101");
    assert_eq!(token.num_base, 2);
    assert_eq!(token.value, "101");
}

#[test]
fn test_prefixed_base_errors() {
    assert!(matches!(scan_error("0x"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("0x1.5"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("0b102"), ErrorImpl::InvalidNumber { .. }));
    assert!(matches!(scan_error("0o8"), ErrorImpl::InvalidNumber { .. }));
}

#[test]
fn test_leading_zero_decimal() {
    assert_eq!(scan_single("0").value, "0");
    assert_eq!(scan_single("007").value, "007");
}

#[test]
fn test_tokenize_strings() {
    let tokens = scan(r#""hello" 'world' "it's" 'say "hi"'"#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "it's");
    assert_eq!(tokens[3].value, "say \"hi\"");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_han_string_payload() {
    let token = scan_single("'我命由我不由天'");
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value, "我命由我不由天");
}

#[test]
fn test_simple_escapes() {
    let token = scan_single(r#""\'\"\a\b\f\n\r\t\v\\""#);
    assert_eq!(token.value, "'\"\x07\x08\x0c\n\r\t\x0b\\");
}

#[test]
fn test_numeric_escapes() {
    assert_eq!(scan_single(r#""\101\0\7""#).value, "A\0\x07");
    assert_eq!(scan_single(r#""\1014""#).value, "A4");
    assert_eq!(scan_single(r#""\x41\x7a""#).value, "Az");
    assert_eq!(scan_single(r#""\u6211""#).value, "我");
    assert_eq!(scan_single(r#""\U0001F600""#).value, "\u{1F600}");
}

#[test]
fn test_escape_errors() {
    assert!(matches!(scan_error(r#""\q""#), ErrorImpl::InvalidEscape { .. }));
    assert!(matches!(scan_error(r#""\8""#), ErrorImpl::InvalidEscape { .. }));
    assert!(matches!(scan_error(r#""\x4""#), ErrorImpl::InvalidEscape { .. }));
    assert!(matches!(scan_error(r#""\u12g4""#), ErrorImpl::InvalidEscape { .. }));
    assert!(matches!(scan_error(r#""\UFFFFFFFF""#), ErrorImpl::InvalidEscape { .. }));
    assert!(matches!(scan_error(r#""\uD800""#), ErrorImpl::InvalidEscape { .. }));
}

#[test]
fn test_unterminated_string() {
    assert_eq!(scan_error("'abc"), ErrorImpl::UnterminatedString);
    assert_eq!(scan_error("\"abc'"), ErrorImpl::UnterminatedString);
    assert_eq!(scan_error("\"abc\\"), ErrorImpl::UnterminatedString);
}

#[test]
fn test_doc_string() {
    let tokens = scan("# first\n#second\n#  third\nx");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, " first\nsecond\n  third");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "x");
}

#[test]
fn test_doc_string_stops_at_unprefixed_line() {
    let tokens = scan("#a\n #b");
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "b");

    let token = scan_single("#tail at eof");
    assert_eq!(token.value, "tail at eof");

    let token = scan_single("#crlf\r\n#lines\r\n");
    assert_eq!(token.value, "crlf\nlines");
}

#[test]
fn test_comments() {
    let tokens = scan("a // line comment\nb /* block\ncomment */ c // at eof");
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();

    assert_eq!(values, vec!["a", "b", "c", "EOF"]);
}

#[test]
fn test_divide_is_not_comment() {
    let tokens = scan("a / b /= c");
    assert!(tokens[1].is_operator(Operator::Divi));
    assert!(tokens[3].is_operator(Operator::AssiDivi));
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("x\n/* open\n", None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnterminatedComment);
    assert_eq!(error.get_line(), 3);
    assert_eq!(error.get_column(), None);
    assert!(error.is_expecting_more());
}

#[test]
fn test_bare_bang_is_error() {
    assert_eq!(scan_error("!"), ErrorImpl::UnrecognisedCharacter { ch: '!' });
    assert_eq!(scan_error("a ! b"), ErrorImpl::UnrecognisedCharacter { ch: '!' });
}

#[test]
fn test_unknown_character() {
    let error = tokenize("x = $;", Some("unit.ail".to_string())).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnrecognisedCharacter { ch: '$' });
    assert_eq!(error.get_position(), Position::new(1, 5));
    assert_eq!(error.get_file(), "unit.ail");
}

#[test]
fn test_positions() {
    let tokens = scan("a\n  bb = 'x'\n\t7");

    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[1].position, Position::new(2, 3));
    assert_eq!(tokens[2].position, Position::new(2, 6));
    assert_eq!(tokens[3].position, Position::new(2, 8));
    assert_eq!(tokens[4].position, Position::new(3, 2));
}

#[test]
fn test_positions_never_decrease() {
    let tokens = scan("fun f(a, *b) {\n  return a ** 2; // c\n}\n# doc\n'我' + \"x\"");

    for pair in tokens.windows(2) {
        assert!(pair[0].position <= pair[1].position);
    }
}

#[test]
fn test_token_display() {
    assert_eq!(
        scan_single("10e26").to_string(),
        "<Token sci number '10', line: 1, col: 1, e: 26>"
    );
    assert_eq!(
        scan_single("0x1f").to_string(),
        "<Token number '1f', line: 1, col: 1, base: 16, type: 2>"
    );
    assert_eq!(
        scan_single("<<=").to_string(),
        "<Token operator AssiLshift, line: 1, col: 1>"
    );
    assert_eq!(scan("")[0].to_string(), "<Token EOF>");
}
