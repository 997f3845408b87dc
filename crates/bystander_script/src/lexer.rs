//! Tokenizer for story script lines.
//!
//! The tokenizer scans one logical line character by character and converts
//! it into a sequence of tokens. A line that does not open with `[` is prose
//! and becomes a single `actor_text` token. Inside a tag, punctuation,
//! literals and identifiers are emitted until the closing `]`, after which
//! the rest of the line is prose.

use bystander_foundation::{Error, ErrorContext, Result};

use crate::token::{Token, TokenKind};

/// Capture mode of the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Between tokens, or accumulating an identifier.
    Idle,
    /// Accumulating a number literal.
    Number,
    /// Inside a quoted string opened with the given quote.
    Quoted(char),
    /// Accumulating prose until the end of the line.
    ActorText,
}

/// Tokenizer for a single logical script line.
pub struct Tokenizer<'src> {
    /// Line being tokenized.
    source: &'src str,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    /// Accumulation buffer shared by all capture modes.
    buffer: String,
    /// Character index where the buffer started.
    buffer_start: usize,
    /// Current capture mode.
    mode: Mode,
    /// Whether a non-whitespace character has been seen.
    started: bool,
    /// Character index of the most recent closing quote.
    closed_at: Option<usize>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a new tokenizer for the given line.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            buffer: String::new(),
            buffer_start: 0,
            mode: Mode::Idle,
            started: false,
            closed_at: None,
        }
    }

    /// Tokenizes a line and returns its tokens.
    ///
    /// # Errors
    /// Returns a lexical error for a number with two decimal points, a quote
    /// opened right after a closing quote, or a string left unterminated.
    pub fn tokenize_all(source: &str) -> Result<Vec<Token>> {
        Tokenizer::new(source).run()
    }

    /// Consumes the tokenizer and scans the whole line.
    ///
    /// # Errors
    /// See [`Tokenizer::tokenize_all`].
    pub fn run(mut self) -> Result<Vec<Token>> {
        for (i, c) in self.source.chars().enumerate() {
            if let Err(e) = self.scan(i, c) {
                return Err(self.fail(e));
            }
        }
        if let Err(e) = self.finish() {
            return Err(self.fail(e));
        }
        Ok(self.tokens)
    }

    /// Feeds one character to the scanner.
    fn scan(&mut self, i: usize, c: char) -> Result<()> {
        match self.mode {
            Mode::ActorText => {
                self.accumulate(i, c);
                return Ok(());
            }
            Mode::Quoted(quote) => {
                if c == quote {
                    self.emit_buffer(TokenKind::String);
                    self.mode = Mode::Idle;
                    self.closed_at = Some(i);
                } else {
                    self.accumulate(i, c);
                }
                return Ok(());
            }
            Mode::Number => {
                if c.is_ascii_digit() {
                    self.accumulate(i, c);
                    return Ok(());
                }
                if c == '.' {
                    if self.buffer.contains('.') {
                        return Err(Error::malformed_number(i, c));
                    }
                    self.accumulate(i, c);
                    return Ok(());
                }
                self.emit_buffer(TokenKind::Number);
                self.mode = Mode::Idle;
                // Fall through: `c` is re-evaluated between tokens.
            }
            Mode::Idle => {}
        }

        if !self.started {
            if is_whitespace(c) {
                return Ok(());
            }
            self.started = true;
            if c != '[' {
                self.mode = Mode::ActorText;
                self.accumulate(i, c);
                return Ok(());
            }
        }

        if let Some(kind) = TokenKind::punctuation(c) {
            self.flush_identifier();
            self.tokens.push(Token::new(kind, c.to_string(), i));
            if kind == TokenKind::RBracket {
                self.mode = Mode::ActorText;
            }
        } else if is_whitespace(c) {
            self.flush_identifier();
        } else if is_quote(c) {
            // No escapes: a quote right after a closing quote is rejected.
            if self.closed_at.is_some_and(|end| end + 1 == i) {
                return Err(Error::malformed_string(i, c));
            }
            self.flush_identifier();
            self.mode = Mode::Quoted(c);
            self.buffer_start = i;
        } else if self.buffer.is_empty() && (c.is_ascii_digit() || c == '+' || c == '-') {
            self.mode = Mode::Number;
            self.accumulate(i, c);
        } else {
            self.accumulate(i, c);
        }

        Ok(())
    }

    /// Flushes whatever the current mode holds at the end of the line.
    fn finish(&mut self) -> Result<()> {
        match self.mode {
            Mode::Idle => self.flush_identifier(),
            Mode::Number => self.emit_buffer(TokenKind::Number),
            Mode::Quoted(quote) => {
                return Err(Error::unterminated_string(self.buffer_start, quote));
            }
            Mode::ActorText => {
                let text = self.buffer.trim();
                if !text.is_empty() {
                    let leading = self.buffer.chars().take_while(|c| c.is_whitespace()).count();
                    let token = Token::new(TokenKind::ActorText, text, self.buffer_start + leading);
                    self.tokens.push(token);
                }
                self.buffer.clear();
            }
        }
        self.mode = Mode::Idle;
        Ok(())
    }

    /// Appends a character to the buffer, recording where the buffer began.
    fn accumulate(&mut self, i: usize, c: char) {
        if self.buffer.is_empty() && !matches!(self.mode, Mode::Quoted(_)) {
            self.buffer_start = i;
        }
        self.buffer.push(c);
    }

    /// Emits the pending buffer as an identifier or bool token.
    fn flush_identifier(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let kind = if self.buffer == "true" || self.buffer == "false" {
            TokenKind::Bool
        } else {
            TokenKind::Identifier
        };
        self.emit_buffer(kind);
    }

    /// Emits the buffer as a token of `kind` and clears it.
    fn emit_buffer(&mut self, kind: TokenKind) {
        let text = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::new(kind, text, self.buffer_start));
    }

    /// Attaches the line and the tokens produced so far to an error.
    fn fail(&self, error: Error) -> Error {
        error.with_context(
            ErrorContext::new()
                .with_line(self.source)
                .with_tokens(self.tokens.iter().map(ToString::to_string))
                .with_position(self.tokens.len()),
        )
    }
}

/// Returns true for the whitespace characters that separate tokens.
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Returns true for string delimiters.
const fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}

/// Tokenizes one logical line.
///
/// # Errors
/// Returns a lexical error if a literal is malformed.
pub fn tokenize(line: &str) -> Result<Vec<Token>> {
    Tokenizer::tokenize_all(line)
}
