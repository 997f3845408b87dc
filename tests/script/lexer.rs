//! Integration tests for the tokenizer
//!
//! Tests tokenization of tag syntax and prose.

use bystander_foundation::ErrorKind;
use bystander_script::{Token, TokenKind, Tokenizer, tokenize};

fn kinds(line: &str) -> Vec<TokenKind> {
    tokenize(line).unwrap().into_iter().map(|t| t.kind).collect()
}

fn texts(line: &str) -> Vec<String> {
    tokenize(line).unwrap().into_iter().map(|t| t.text).collect()
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn tokenize_dialogue_line() {
    use TokenKind::{ActorText, Comma, Equal, Identifier, LBracket, Number, RBracket, String};
    assert_eq!(
        kinds(r#"[name="Foo",delay=0.1]Hello there"#),
        vec![
            LBracket, Identifier, Equal, String, Comma, Identifier, Equal, Number, RBracket,
            ActorText
        ]
    );
    assert_eq!(
        texts(r#"[name="Foo",delay=0.1]Hello there"#),
        vec!["[", "name", "=", "Foo", ",", "delay", "=", "0.1", "]", "Hello there"]
    );
}

#[test]
fn tokenize_call_with_parameters() {
    use TokenKind::{Comma, Equal, Identifier, LBracket, LParen, Number, RBracket, RParen, String};
    assert_eq!(
        kinds(r#"[Image(image="bg_room", fadetime=1)]"#),
        vec![
            LBracket, Identifier, LParen, Identifier, Equal, String, Comma, Identifier, Equal,
            Number, RParen, RBracket
        ]
    );
}

#[test]
fn tokenize_colon_assignment() {
    assert_eq!(
        kinds("[a:1]"),
        vec![
            TokenKind::LBracket,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Number,
            TokenKind::RBracket
        ]
    );
}

#[test]
fn tokenize_signed_numbers() {
    assert_eq!(texts("[x=-2, y=+3.5]")[3], "-2");
    assert_eq!(texts("[x=-2, y=+3.5]")[7], "+3.5");
}

#[test]
fn tokenize_number_then_identifier() {
    // A number ends at the first non-digit, which starts a new token.
    let tokens = tokenize("[a=12ab]").unwrap();
    assert_eq!(tokens[3], Token::new(TokenKind::Number, "12", 3));
    assert_eq!(tokens[4], Token::new(TokenKind::Identifier, "ab", 5));
}

#[test]
fn tokenize_bools() {
    let tokens = tokenize("[a=true, b=false, c=truely]").unwrap();
    assert_eq!(tokens[3].kind, TokenKind::Bool);
    assert_eq!(tokens[7].kind, TokenKind::Bool);
    assert_eq!(tokens[11].kind, TokenKind::Identifier);
}

#[test]
fn tokenize_whitespace_between_tokens() {
    assert_eq!(kinds("[ a = 1 ]"), kinds("[a=1]"));
    assert_eq!(kinds("[\ta\t=\t1\t]"), kinds("[a=1]"));
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn tokenize_strings_verbatim() {
    assert_eq!(texts(r#"[a="x, y = (z)"]"#)[3], "x, y = (z)");
    assert_eq!(texts("[a='single']")[3], "single");
    assert_eq!(texts(r#"[name="Kal'tsit"]"#)[3], "Kal'tsit");
}

#[test]
fn tokenize_adjacent_strings_separated_by_space() {
    assert_eq!(texts(r#"[a="x" "y"]"#)[3..5], ["x", "y"]);
}

#[test]
fn doubled_quote_is_malformed() {
    let err = tokenize(r#"[a="x""y"]"#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedString { position: 6, .. }));
}

#[test]
fn unterminated_string_is_error() {
    let err = tokenize("[a='open").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnterminatedString {
            position: 3,
            quote: '\''
        }
    ));
}

// =============================================================================
// Prose
// =============================================================================

#[test]
fn prose_line_is_single_actor_text() {
    let tokens = tokenize("   The wind howls. [not a tag]  ").unwrap();
    assert_eq!(
        tokens,
        vec![Token::new(TokenKind::ActorText, "The wind howls. [not a tag]", 3)]
    );
}

#[test]
fn actor_text_is_trimmed_and_verbatim() {
    let tokens = tokenize(r#"[a=1]   "Quoted", (and) = 2.2.2  "#).unwrap();
    assert_eq!(tokens.last().unwrap().text, r#""Quoted", (and) = 2.2.2"#);
}

#[test]
fn whitespace_only_line_has_no_tokens() {
    assert!(tokenize("  \t ").unwrap().is_empty());
    assert!(tokenize("").unwrap().is_empty());
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn second_decimal_point_is_malformed() {
    let err = tokenize("[a=1.2.3]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedNumber {
            position: 6,
            character: '.'
        }
    ));
}

#[test]
fn error_context_has_tokens_so_far() {
    let err = Tokenizer::tokenize_all("[a=1.2.3]").unwrap_err();
    let ctx = err.context.unwrap();
    assert_eq!(ctx.line.as_deref(), Some("[a=1.2.3]"));
    assert_eq!(ctx.tokens, vec!["'[' '['", "identifier 'a'", "'=' '='"]);
    assert_eq!(ctx.position, Some(3));
}
