//! Integration tests for speaker resolution

use bystander_script::{BatchConfig, ErrorPolicy, parse_script};
use bystander_story::{ActorLine, convert_passage, convert_story_text};

const STAGE: &str = "\
[HEADER(key=\"title_test\", is_skippable=true, fit_mode=\"BLACK_MASK\")]Operation Start
[Background(image=\"bg_field\", fadetime=1)]
[Dialog]
The field is quiet.
[name=\"Amiya\", delay=0.1]Doctor, \\
are you ready?
[Character(name=\"char_002_amiya\")]
[name=\"Kal'tsit\"]We move at dawn.
[PlaySound(key=\"$door\")]
[background()]
[name=\"Amiya\"]
";

#[test]
fn stage_dialogue() {
    let report = parse_script(STAGE, &BatchConfig::new()).unwrap();
    assert_eq!(
        convert_story_text(report.script_lines()),
        vec![
            ActorLine::scene_break(),
            ActorLine::narration("The field is quiet."),
            ActorLine::new("Amiya", "Doctor, are you ready?"),
            ActorLine::new("Kal'tsit", "We move at dawn."),
            ActorLine::scene_break(),
            ActorLine::new("Amiya", ""),
        ]
    );
}

#[test]
fn header_with_parameters_titles_passage() {
    let passage = convert_passage(STAGE, &BatchConfig::new()).unwrap();
    assert_eq!(passage.title, "Operation Start");
    assert_eq!(passage.lines.len(), 6);
}

#[test]
fn call_parameters_named_name_are_not_speakers() {
    let report = parse_script("[Character(name=\"char_002_amiya\")]Hi", &BatchConfig::new()).unwrap();
    assert!(convert_story_text(report.script_lines()).is_empty());
}

#[test]
fn first_deciding_action_wins() {
    let report = parse_script("[delay=1, name=\"Amiya\", name=\"Other\"]Hi", &BatchConfig::new()).unwrap();
    assert_eq!(
        convert_story_text(report.script_lines()),
        vec![ActorLine::new("Amiya", "Hi")]
    );
}

#[test]
fn non_string_names_render_as_text() {
    let report = parse_script("[name=7]Seven speaks.", &BatchConfig::new()).unwrap();
    assert_eq!(
        convert_story_text(report.script_lines()),
        vec![ActorLine::new("7", "Seven speaks.")]
    );
}

#[test]
fn passage_skips_broken_lines_when_asked() {
    let raw = "[name=\"Amiya\"]One.\n[name=\"Amiya\"\n[name=\"Amiya\"]Two.";
    assert!(convert_passage(raw, &BatchConfig::new()).is_err());

    let config = BatchConfig::new().with_policy(ErrorPolicy::Skip);
    let passage = convert_passage(raw, &config).unwrap();
    assert_eq!(
        passage.lines,
        vec![ActorLine::new("Amiya", "One."), ActorLine::new("Amiya", "Two.")]
    );
}
