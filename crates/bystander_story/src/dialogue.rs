//! Speaker resolution over parsed script lines.
//!
//! A line's speaker is the value of its `name` property. A `background` call
//! marks a scene break. Prose with no tag is narration with an empty speaker.
//! Any other tag is ignored.

use std::fmt;

use bystander_foundation::Result;
use bystander_script::{Action, BatchConfig, ScriptLine, parse_script};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Call name marking a scene break, compared ignoring case.
pub const SCENE_BREAK_CALL: &str = "background";

/// Call name whose actor text is the passage title.
pub const TITLE_CALL: &str = "HEADER";

/// Property key naming the speaker.
pub const SPEAKER_KEY: &str = "name";

/// One speaker/text pair.
///
/// Narration has an empty name; a scene break has both fields empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorLine {
    /// Speaker name, empty for narration.
    pub name: String,
    /// Spoken or narrated text.
    pub text: String,
}

impl ActorLine {
    /// Creates a new actor line.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Creates a narration line with no speaker.
    #[must_use]
    pub fn narration(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }

    /// Creates a scene break.
    #[must_use]
    pub fn scene_break() -> Self {
        Self::default()
    }

    /// Returns true if this line is a scene break.
    #[must_use]
    pub fn is_scene_break(&self) -> bool {
        self.name.is_empty() && self.text.is_empty()
    }
}

/// Renders narration as its text, a scene break as `---`, and speech as
/// `name: text`.
impl fmt::Display for ActorLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scene_break() {
            write!(f, "---")
        } else if self.name.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{}: {}", self.name, self.text)
        }
    }
}

/// The dialogue of one script file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Title from the script's `HEADER` tag, empty if there was none.
    pub title: String,
    /// Dialogue in script order.
    pub lines: Vec<ActorLine>,
}

/// Resolves the speaker of each parsed line.
#[must_use]
pub fn convert_story_text<'a, I>(lines: I) -> Vec<ActorLine>
where
    I: IntoIterator<Item = &'a ScriptLine>,
{
    lines.into_iter().filter_map(actor_line).collect()
}

/// Resolves one line: the first action that names a speaker or breaks the
/// scene decides; lines with neither are dropped.
fn actor_line(line: &ScriptLine) -> Option<ActorLine> {
    let Some(actions) = &line.actions else {
        return line.actor_text.as_deref().map(ActorLine::narration);
    };

    actions.iter().find_map(|action| match action {
        Action::Property(p) if p.key == SPEAKER_KEY => Some(ActorLine::new(
            p.value.to_string(),
            line.actor_text.clone().unwrap_or_default(),
        )),
        Action::Call(c) if c.is_named(SCENE_BREAK_CALL) => Some(ActorLine::scene_break()),
        _ => None,
    })
}

/// Returns the passage title: the actor text of the last `HEADER` call.
fn title<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a ScriptLine>,
{
    lines
        .into_iter()
        .filter(|line| {
            line.actions()
                .filter_map(Action::as_call)
                .any(|c| c.name == TITLE_CALL)
        })
        .last()
        .and_then(|line| line.actor_text.clone())
        .unwrap_or_default()
}

/// Parses a raw script and extracts its title and dialogue.
///
/// # Errors
/// Returns the error of the first malformed line unless the configuration
/// skips failing lines.
pub fn convert_passage(raw: &str, config: &BatchConfig) -> Result<Passage> {
    let report = parse_script(raw, config)?;
    let passage = Passage {
        title: title(report.script_lines()),
        lines: convert_story_text(report.script_lines()),
    };
    debug!(title = %passage.title, lines = passage.lines.len(), "converted passage");
    Ok(passage)
}
