//! The main REPL implementation.

use crate::document::{Document, Mode, process_path};
use crate::editor::{LineEditor, ReadResult, RustylineEditor, is_continued};
use bystander_foundation::{Error, ErrorKind, Result};
use bystander_script::{BatchConfig, Parser, ScriptLine, Token, split_lines, tokenize};
use bystander_story::convert_story_text;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// `:tokens on|off`
    Tokens(bool),
    /// `:dialogue`
    Dialogue,
    /// `:load PATH`
    Load(PathBuf),
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

impl Command {
    /// Parses a command line (including the leading `:`).
    fn parse(input: &str) -> Result<Self> {
        let mut parts = input.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).unwrap_or_default();

        match (name, argument) {
            (":tokens", "on") => Ok(Self::Tokens(true)),
            (":tokens", "off") => Ok(Self::Tokens(false)),
            (":tokens", _) => Err(usage(":tokens on|off")),
            (":dialogue", "") => Ok(Self::Dialogue),
            (":load", "") => Err(usage(":load PATH")),
            (":load", path) => Ok(Self::Load(PathBuf::from(path))),
            (":help", "") => Ok(Self::Help),
            (":quit" | ":q", "") => Ok(Self::Quit),
            _ => Err(Error::new(ErrorKind::Command(format!(
                "unknown command: {input} (try :help)"
            )))),
        }
    }
}

fn usage(text: &str) -> Error {
    Error::new(ErrorKind::Command(format!("usage: {text}")))
}

/// The interactive REPL.
///
/// Each input is split into logical lines, tokenized and parsed. The REPL
/// prints the parsed line, or the speaker/text pair in dialogue mode.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Print token streams before parse results.
    show_tokens: bool,

    /// Print speaker/text pairs instead of parse results.
    dialogue: bool,

    /// Configuration for `:load`.
    config: BatchConfig,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            show_tokens: false,
            dialogue: false,
            config: BatchConfig::new(),
            show_banner: true,
            prompt: "[]> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Sets the configuration used by `:load`.
    #[must_use]
    pub const fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts with token display enabled or disabled.
    #[must_use]
    pub const fn with_tokens(mut self, show_tokens: bool) -> Self {
        self.show_tokens = show_tokens;
        self
    }

    /// Starts in dialogue mode.
    #[must_use]
    pub const fn with_dialogue(mut self, dialogue: bool) -> Self {
        self.dialogue = dialogue;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false); // EOF
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        if input.trim_start().starts_with(':') {
            match Command::parse(&input) {
                Ok(Command::Quit) => return Ok(false),
                Ok(command) => match self.execute(command) {
                    Ok(output) => print!("{output}"),
                    Err(e) => self.print_error(&e),
                },
                Err(e) => self.print_error(&e),
            }
            return Ok(true);
        }

        match self.eval(&input) {
            Ok(output) => print!("{output}"),
            Err(e) => self.print_error(&e),
        }
        Ok(true)
    }

    /// Reads input, following continuation markers onto further lines.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(Some(String::new()));
            }
            ReadResult::Eof => return Ok(None),
        };

        while is_continued(&input) {
            match self.editor.read_continuation(&self.continuation_prompt)? {
                ReadResult::Line(line) => {
                    input.push('\n');
                    input.push_str(&line);
                }
                ReadResult::Interrupted => {
                    println!("\nInput cancelled.");
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    return Err(Error::new(ErrorKind::Io(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }

        Ok(Some(input))
    }

    /// Tokenizes and parses input, returning the text to print.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or structural error.
    pub fn eval(&self, input: &str) -> Result<String> {
        let mut output = String::new();

        for source in split_lines(input) {
            let tokens = tokenize(&source)?;
            if self.show_tokens {
                output.push_str(&format_tokens(&tokens));
            }

            let line = Parser::new(&tokens)
                .parse()
                .map_err(|e| e.map_context(|ctx| ctx.with_line(source.as_str())))?;

            if self.dialogue {
                for actor_line in convert_story_text([&line]) {
                    let _ = writeln!(output, "\x1b[1m{actor_line}\x1b[0m");
                }
            } else {
                output.push_str(&format_line(&line));
            }
        }

        Ok(output)
    }

    /// Executes a REPL command, returning the text to print.
    fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Tokens(on) => {
                self.show_tokens = on;
                Ok(format!("token display {}\n", if on { "on" } else { "off" }))
            }
            Command::Dialogue => {
                self.dialogue = !self.dialogue;
                Ok(format!(
                    "dialogue mode {}\n",
                    if self.dialogue { "on" } else { "off" }
                ))
            }
            Command::Load(path) => {
                let mode = if self.dialogue || path.is_dir() {
                    Mode::Dialogue
                } else {
                    Mode::Parse
                };
                let document: Document = process_path(&path, mode, &self.config)?;
                Ok(document.to_string())
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// Prints an error and its context to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
        if let Some(context) = &error.context {
            eprint!("\x1b[2m{context}\x1b[0m");
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mBystander REPL v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type script lines to parse them. :help lists commands, Ctrl+D exits.\n");

        let _ = io::stdout().flush();
    }
}

const HELP: &str = "\
:tokens on|off   Show or hide token streams
:dialogue        Toggle dialogue mode (speaker/text pairs)
:load PATH       Process a script file, or a directory as a chapter
:help            Show this help
:quit            Exit the REPL
A trailing \\ continues input on the next line.
";

/// Renders a token stream, one token per row.
fn format_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let _ = writeln!(output, "\x1b[2m{i:>3} @{:<3} {token}\x1b[0m", token.position);
    }
    output
}

/// Renders a parsed line: its actions, then its prose.
fn format_line(line: &ScriptLine) -> String {
    let mut output = String::new();
    if line.is_blank() {
        output.push_str("\x1b[2m(empty)\x1b[0m\n");
        return output;
    }
    for action in line.actions() {
        let _ = writeln!(output, "\x1b[36maction\x1b[0m {action}");
    }
    if let Some(text) = &line.actor_text {
        let _ = writeln!(output, "\x1b[33mtext\x1b[0m   {text}");
    }
    output
}
