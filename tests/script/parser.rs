//! Integration tests for the parser
//!
//! Tests the documented line shapes, downstream helpers, and diagnostics.

use bystander_foundation::{ErrorKind, Value};
use bystander_script::{Action, Call, Parser, Property, ScriptLine, parse, parse_line, tokenize};
use proptest::prelude::*;

// =============================================================================
// Line Shapes
// =============================================================================

#[test]
fn dialogue_line() {
    let line = parse_line(r#"[name="Foo",delay=0.1]Hello there"#).unwrap();
    assert_eq!(
        line,
        ScriptLine::new(
            Some(vec![
                Property::new("name", "Foo").into(),
                Property::new("delay", 0.1).into(),
            ]),
            Some("Hello there".to_string()),
        )
    );
}

#[test]
fn header_line() {
    let line = parse_line("[HEADER]Title text").unwrap();
    assert_eq!(line.actions, Some(vec![Call::bare("HEADER").into()]));
    assert_eq!(line.actor_text.as_deref(), Some("Title text"));
}

#[test]
fn background_line() {
    let line = parse_line("[background()]").unwrap();
    assert_eq!(
        line.actions,
        Some(vec![Call::with_parameters("background", vec![]).into()])
    );
    assert_eq!(line.actor_text, None);
}

#[test]
fn numbers_by_text() {
    let line = parse_line("[a=10, b=0.1]").unwrap();
    assert_eq!(line.find_property("a").unwrap().value, Value::Int(10));
    assert_eq!(line.find_property("b").unwrap().value, Value::Float(0.1));
}

#[test]
fn tag_without_brackets() {
    // Bracket-less tag syntax is still accepted by the grammar.
    let tokens = tokenize("[a=1]").unwrap();
    let line = parse(&tokens[1..4]).unwrap();
    assert_eq!(line.actions, Some(vec![Property::new("a", 1_i64).into()]));
}

#[test]
fn call_with_equal_sign_and_trailing_text() {
    let line = parse_line("[Delay=(time=1.5)]  after the pause").unwrap();
    let call = line.find_call("delay").unwrap();
    assert_eq!(call.parameter("time"), Some(&Value::Float(1.5)));
    assert_eq!(line.actor_text.as_deref(), Some("after the pause"));
}

#[test]
fn name_followed_by_equal_and_boundary_is_bare_call() {
    let line = parse_line("[a=]").unwrap();
    assert_eq!(line.actions, Some(vec![Call::bare("a").into()]));
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn speaker_and_lookups() {
    let line = parse_line(r#"[name="Amiya", focus=1]Doctor?"#).unwrap();
    assert_eq!(line.speaker(), Some(&Value::from("Amiya")));
    assert!(line.find_property("focus").is_some());
    assert!(line.find_call("name").is_none());
    assert_eq!(line.actions().map(Action::name).collect::<Vec<_>>(), vec!["name", "focus"]);
}

#[test]
fn display_reparses_to_same_line() {
    for source in [
        r#"[name="Foo", delay=0.1]Hello there"#,
        r#"[Image(image="bg", fadetime=1, keep=true)]"#,
        "[Dialog(head=)]",
        "[HEADER]Title",
        "Plain prose.",
        r#"[name='Say "hi"']"#,
    ] {
        let line = parse_line(source).unwrap();
        assert_eq!(parse_line(&line.to_string()).unwrap(), line, "{source}");
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unclosed_bracket_identifies_cursor() {
    let err = parse_line(r#"[name="A""#).unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(err.kind, ErrorKind::UnclosedBracket { .. }));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.tokens, vec!["'[' '['", "identifier 'name'", "'=' '='", "string 'A'"]);
}

#[test]
fn unclosed_parenthesis_inside_tag() {
    let err = parse_line("[Image(image=\"bg\"]").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnclosedParenthesis { position: 6 }));
}

#[test]
fn missing_value_before_non_boundary() {
    let err = parse_line("[a=1, b=c]").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingValue { .. }));
}

#[test]
fn lexical_error_surfaces_through_parse_line() {
    let err = parse_line("[a=1.2.3]").unwrap_err();
    assert!(err.is_lexical());
}

#[test]
fn parser_is_reusable() {
    let tokens = tokenize("[a=1, b=2]rest").unwrap();
    let parser = Parser::new(&tokens);
    assert_eq!(parser.parse().unwrap(), parser.parse().unwrap());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn generated_properties_parse(
        pairs in prop::collection::vec(("k[a-z_]{0,8}", 0_i64..10_000), 1..6),
        text in "[A-Za-z ,.?!]{0,30}",
    ) {
        let tag = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let source = format!("[{tag}]{text}");
        let line = parse_line(&source).unwrap();

        let expected: Vec<Action> = pairs
            .iter()
            .map(|(k, v)| Property::new(k.as_str(), *v).into())
            .collect();
        prop_assert_eq!(line.actions, Some(expected));
        let trimmed = text.trim();
        prop_assert_eq!(line.actor_text.as_deref(), (!trimmed.is_empty()).then_some(trimmed));
    }
}
