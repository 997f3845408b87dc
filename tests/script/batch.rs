//! Integration tests for whole-script processing
//!
//! Tests line numbering, error policies, and parallel parsing.

use bystander_foundation::ErrorKind;
use bystander_script::{BatchConfig, ErrorPolicy, parse_line, parse_script, split_lines};
use proptest::prelude::*;

const STAGE: &str = "\
[HEADER]Operation Start
[Background(image=\"bg_field\", fadetime=1)]
[Dialog]
The field is quiet.
[name=\"Amiya\", delay=0.1]Doctor, \\
are you ready?
[name=\"Kal'tsit\"]We move at dawn.
[background()]
";

#[test]
fn script_parses_in_order() {
    let report = parse_script(STAGE, &BatchConfig::new()).unwrap();
    assert!(report.is_clean());
    let numbers: Vec<_> = report.lines.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 7, 8]);
    assert_eq!(report.lines[4].source, "[name=\"Amiya\", delay=0.1]Doctor, are you ready?");
}

#[test]
fn report_matches_line_by_line_parsing() {
    let report = parse_script(STAGE, &BatchConfig::new()).unwrap();
    let expected: Vec<_> = split_lines(STAGE)
        .iter()
        .map(|l| parse_line(l).unwrap())
        .collect();
    assert_eq!(report.into_script_lines(), expected);
}

#[test]
fn parallel_preserves_order() {
    let script = STAGE.repeat(200);
    let sequential = parse_script(&script, &BatchConfig::new()).unwrap();
    let parallel = parse_script(&script, &BatchConfig::new().with_parallel(true)).unwrap();
    assert_eq!(sequential.lines, parallel.lines);
}

#[test]
fn abort_returns_lowest_failing_line_in_parallel() {
    let script = "ok\n[a=\"open\nfine\n[b=1.2.3]\n";
    let config = BatchConfig::new().with_parallel(true);
    let err = parse_script(script, &config).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnterminatedString { .. }));
    assert_eq!(err.context.unwrap().line_number, Some(2));
}

#[test]
fn skip_keeps_good_lines() {
    let script = "ok\n[a=\"open\nfine\n[b(c=1]\n";
    let config = BatchConfig::new().with_policy(ErrorPolicy::Skip);
    let report = parse_script(script, &config).unwrap();

    let sources: Vec<_> = report.lines.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, vec!["ok", "fine"]);

    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped[0].error.is_lexical());
    assert!(report.skipped[1].error.is_structural());
    assert_eq!(report.skipped[1].source, "[b(c=1]");
    assert_eq!(
        report.skipped[1].error.context.as_ref().and_then(|c| c.line_number),
        Some(4)
    );
}

#[test]
fn empty_script_is_clean() {
    let report = parse_script("\n\n", &BatchConfig::new()).unwrap();
    assert!(report.lines.is_empty());
    assert!(report.is_clean());
}

proptest! {
    #[test]
    fn parallel_equals_sequential(lines in prop::collection::vec("[^\\r\\n\\\\]{0,30}", 0..30)) {
        let script = lines.join("\n");
        let skip = BatchConfig::new().with_policy(ErrorPolicy::Skip);
        let sequential = parse_script(&script, &skip).unwrap();
        let parallel = parse_script(&script, &skip.with_parallel(true)).unwrap();
        prop_assert_eq!(sequential.lines, parallel.lines);
        let seq_failed: Vec<_> = sequential.skipped.iter().map(|f| f.number).collect();
        let par_failed: Vec<_> = parallel.skipped.iter().map(|f| f.number).collect();
        prop_assert_eq!(seq_failed, par_failed);
    }
}
