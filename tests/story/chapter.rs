//! Integration tests for chapter loading

use std::fs;
use std::path::PathBuf;

use bystander_foundation::ErrorKind;
use bystander_script::BatchConfig;
use bystander_story::{ActorLine, load_chapter};

fn chapter_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("bystander_story_tests_{}", std::process::id()))
        .join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn chapter_from_directory() {
    let dir = chapter_dir("Prologue");
    fs::write(dir.join("level_02.txt"), "[HEADER]Second\n[name=\"Amiya\"]Again.").unwrap();
    fs::write(dir.join("level_01.txt"), "[HEADER]First\r\nDawn.\r\n[background]\r\n").unwrap();

    let chapter = load_chapter(&dir, &BatchConfig::new().with_parallel(true)).unwrap();
    assert_eq!(chapter.title, "Prologue");
    assert_eq!(chapter.passages.len(), 2);
    assert_eq!(chapter.passages[0].title, "First");
    assert_eq!(
        chapter.passages[0].lines,
        vec![ActorLine::narration("Dawn."), ActorLine::scene_break()]
    );
    assert_eq!(chapter.passages[1].lines, vec![ActorLine::new("Amiya", "Again.")]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_directory_is_empty_chapter() {
    let dir = chapter_dir("Empty");
    let chapter = load_chapter(&dir, &BatchConfig::new()).unwrap();
    assert_eq!(chapter.title, "Empty");
    assert!(chapter.passages.is_empty());
    assert_eq!(chapter.line_count(), 0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_path_is_not_a_chapter() {
    let dir = chapter_dir("NotADir");
    let file = dir.join("a.txt");
    fs::write(&file, "Hello.").unwrap();
    let err = load_chapter(&file, &BatchConfig::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    fs::remove_dir_all(&dir).unwrap();
}
