//! Processing whole inputs for the command line.
//!
//! A [`Document`] is what one input file or directory turns into under the
//! selected [`Mode`]. Documents render as text and serialize through serde.

use std::fmt;
use std::fs;
use std::path::Path;

use bystander_foundation::{Error, ErrorKind, Result};
use bystander_script::{
    BatchConfig, ErrorPolicy, ParsedEntry, Token, numbered_lines, parse_script, tokenize,
};
use bystander_story::{Chapter, Passage, convert_passage, load_chapter};
use serde::Serialize;
use tracing::{debug, warn};

/// What to produce from an input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The parsed form of every line.
    #[default]
    Parse,
    /// The token stream of every line.
    Tokens,
    /// Speaker/text pairs.
    Dialogue,
}

/// The tokens of one logical line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenLine {
    /// 1-based physical line number where the logical line starts.
    pub number: usize,
    /// The logical line text.
    pub source: String,
    /// Tokens of the line.
    pub tokens: Vec<Token>,
}

/// The processed form of one input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// Token streams, one per logical line.
    Tokens(Vec<TokenLine>),
    /// Parsed lines.
    Script(Vec<ParsedEntry>),
    /// Dialogue of a single script.
    Passage(Passage),
    /// Dialogue of a directory of scripts.
    Chapter(Chapter),
}

/// Processes the text of one script.
///
/// # Errors
///
/// Returns the first lexical or structural error unless the configuration
/// skips failing lines.
pub fn process_source(raw: &str, mode: Mode, config: &BatchConfig) -> Result<Document> {
    match mode {
        Mode::Parse => Ok(Document::Script(parse_script(raw, config)?.lines)),
        Mode::Tokens => token_lines(raw, config).map(Document::Tokens),
        Mode::Dialogue => Ok(Document::Passage(convert_passage(raw, config)?)),
    }
}

/// Processes a script file, or a directory of scripts in dialogue mode.
///
/// # Errors
///
/// Returns an error if the input cannot be read or fails to process. A
/// directory is only accepted in [`Mode::Dialogue`].
pub fn process_path(path: &Path, mode: Mode, config: &BatchConfig) -> Result<Document> {
    debug!(path = %path.display(), ?mode, "processing input");

    if path.is_dir() {
        if mode != Mode::Dialogue {
            return Err(Error::new(ErrorKind::Io(format!(
                "'{}' is a directory; directories are only read in dialogue mode",
                path.display()
            ))));
        }
        return load_chapter(path, config).map(Document::Chapter);
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    process_source(&raw, mode, config).map_err(|e| {
        e.map_context(|mut ctx| match ctx.line.take() {
            Some(line) => ctx.with_line(format!("{}: {line}", path.display())),
            None => ctx.with_line(path.display().to_string()),
        })
    })
}

fn token_lines(raw: &str, config: &BatchConfig) -> Result<Vec<TokenLine>> {
    let mut lines = Vec::new();
    for (number, source) in numbered_lines(raw) {
        match tokenize(&source) {
            Ok(tokens) => lines.push(TokenLine {
                number,
                source,
                tokens,
            }),
            Err(error) => {
                let error = error.map_context(|ctx| ctx.with_line_number(number));
                match config.policy {
                    ErrorPolicy::Abort => return Err(error),
                    ErrorPolicy::Skip => warn!(number, line = %source, %error, "skipping line"),
                }
            }
        }
    }
    Ok(lines)
}

fn write_passage(f: &mut fmt::Formatter<'_>, passage: &Passage) -> fmt::Result {
    if !passage.title.is_empty() {
        writeln!(f, "# {}", passage.title)?;
    }
    for line in &passage.lines {
        writeln!(f, "{line}")?;
    }
    Ok(())
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokens(lines) => {
                for line in lines {
                    writeln!(f, "{:>4} | {}", line.number, line.source)?;
                    for token in &line.tokens {
                        writeln!(f, "     | {:>3} {token}", token.position)?;
                    }
                }
                Ok(())
            }
            Self::Script(entries) => {
                for entry in entries {
                    writeln!(f, "{:>4} | {}", entry.number, entry.line)?;
                }
                Ok(())
            }
            Self::Passage(passage) => write_passage(f, passage),
            Self::Chapter(chapter) => {
                writeln!(f, "== {} ==", chapter.title)?;
                for passage in &chapter.passages {
                    writeln!(f)?;
                    write_passage(f, passage)?;
                }
                Ok(())
            }
        }
    }
}
