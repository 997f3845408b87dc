//! Loading a chapter from a directory of script files.

use std::fs;
use std::path::{Path, PathBuf};

use bystander_foundation::{Error, ErrorKind, Result};
use bystander_script::BatchConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialogue::{Passage, convert_passage};

/// File extension of script files.
pub const SCRIPT_EXTENSION: &str = "txt";

/// The passages of one chapter, in file name order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter title, taken from the directory name.
    pub title: String,
    /// One passage per script file.
    pub passages: Vec<Passage>,
}

impl Chapter {
    /// Returns the total number of dialogue lines across all passages.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.passages.iter().map(|p| p.lines.len()).sum()
    }
}

/// Loads every `.txt` script in `dir` as one chapter.
///
/// Files are read in file name order. Subdirectories and files with other
/// extensions are ignored.
///
/// # Errors
///
/// Returns an error if the directory or a script cannot be read, or if a
/// script fails to parse under the configured error policy.
pub fn load_chapter<P: AsRef<Path>>(dir: P, config: &BatchConfig) -> Result<Chapter> {
    let dir = dir.as_ref();
    let title = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let files = script_files(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "loading chapter");

    let mut passages = Vec::with_capacity(files.len());
    for path in &files {
        let raw = fs::read_to_string(path).map_err(|e| io_error("failed to read file", path, &e))?;
        let passage = convert_passage(&raw, config).map_err(|e| {
            e.map_context(|mut ctx| match ctx.line.take() {
                Some(line) => ctx.with_line(format!("{}: {line}", path.display())),
                None => ctx.with_line(path.display().to_string()),
            })
        })?;
        passages.push(passage);
    }

    let chapter = Chapter { title, passages };
    info!(title = %chapter.title, passages = chapter.passages.len(), "chapter loaded");
    Ok(chapter)
}

/// Lists the script files of a directory, sorted by name.
fn script_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| io_error("failed to read directory", dir, &e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| io_error("failed to read directory", dir, &e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!("{action} '{}': {e}", path.display())))
}
