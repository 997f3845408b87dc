//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use bystander_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_malformed_number() {
    let err = Error::malformed_number(7, '.');
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedNumber {
            position: 7,
            character: '.'
        }
    ));
    assert!(err.is_lexical());
}

#[test]
fn error_malformed_string() {
    let err = Error::malformed_string(3, '"');
    assert!(matches!(err.kind, ErrorKind::MalformedString { .. }));
    assert!(err.is_lexical());
}

#[test]
fn error_unterminated_string() {
    let err = Error::unterminated_string(4, '\'');
    assert!(matches!(err.kind, ErrorKind::UnterminatedString { position: 4, quote: '\'' }));
    assert!(err.is_lexical());
}

#[test]
fn structural_errors() {
    assert!(Error::unclosed_bracket(1).is_structural());
    assert!(Error::unclosed_parenthesis(2).is_structural());
    assert!(Error::missing_value("name", 3).is_structural());
    assert!(Error::new(ErrorKind::InvalidNumber { text: "-".into() }).is_structural());
}

#[test]
fn runtime_errors_are_neither() {
    let err = Error::new(ErrorKind::Io("disk full".into()));
    assert!(!err.is_lexical());
    assert!(!err.is_structural());
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn error_display_malformed_number() {
    let msg = format!("{}", Error::malformed_number(5, '.'));
    assert!(msg.contains("position 5"));
    assert!(msg.contains("'.'"));
}

#[test]
fn error_display_unclosed_bracket() {
    let msg = format!("{}", Error::unclosed_bracket(4));
    assert!(msg.contains("left bracket is never closed"));
}

#[test]
fn error_display_unclosed_parenthesis() {
    let msg = format!("{}", Error::unclosed_parenthesis(4));
    assert!(msg.contains("left parenthesis is never closed"));
}

#[test]
fn error_display_missing_value() {
    let msg = format!("{}", Error::missing_value("delay", 3));
    assert!(msg.contains("cannot find value for property 'delay'"));
}

#[test]
fn error_display_invalid_number() {
    let msg = format!("{}", Error::new(ErrorKind::InvalidNumber { text: "+".into() }));
    assert!(msg.contains("invalid number literal: +"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_builders() {
    let ctx = ErrorContext::new()
        .with_line("[a")
        .with_line_number(3)
        .with_tokens(vec!["'[' '['".to_string()])
        .with_position(1);
    assert_eq!(ctx.line.as_deref(), Some("[a"));
    assert_eq!(ctx.line_number, Some(3));
    assert_eq!(ctx.tokens, vec!["'[' '['"]);
    assert_eq!(ctx.position, Some(1));
}

#[test]
fn map_context_creates_missing_context() {
    let err = Error::unclosed_bracket(0).map_context(|ctx| ctx.with_line_number(9));
    assert_eq!(err.context.unwrap().line_number, Some(9));
}

#[test]
fn with_context_replaces() {
    let err = Error::unclosed_bracket(0)
        .with_context(ErrorContext::new().with_line_number(1))
        .with_context(ErrorContext::new().with_line("x"));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.line_number, None);
    assert_eq!(ctx.line.as_deref(), Some("x"));
}

#[test]
fn context_display_without_tokens() {
    let text = format!("{}", ErrorContext::new().with_line("Hello"));
    assert_eq!(text, "at: Hello\n");
}
