//! Error types for Bystander.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type used throughout Bystander.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Bystander operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Applies `f` to the existing context, creating an empty one first if needed.
    #[must_use]
    pub fn map_context(mut self, f: impl FnOnce(ErrorContext) -> ErrorContext) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(f(context));
        self
    }

    /// Creates a malformed number error (a second decimal point).
    #[must_use]
    pub fn malformed_number(position: usize, character: char) -> Self {
        Self::new(ErrorKind::MalformedNumber {
            position,
            character,
        })
    }

    /// Creates a malformed string error (a quote doubled as an escape).
    #[must_use]
    pub fn malformed_string(position: usize, character: char) -> Self {
        Self::new(ErrorKind::MalformedString {
            position,
            character,
        })
    }

    /// Creates an unterminated string error.
    #[must_use]
    pub fn unterminated_string(position: usize, quote: char) -> Self {
        Self::new(ErrorKind::UnterminatedString { position, quote })
    }

    /// Creates an unclosed bracket error.
    #[must_use]
    pub fn unclosed_bracket(position: usize) -> Self {
        Self::new(ErrorKind::UnclosedBracket { position })
    }

    /// Creates an unclosed parenthesis error.
    #[must_use]
    pub fn unclosed_parenthesis(position: usize) -> Self {
        Self::new(ErrorKind::UnclosedParenthesis { position })
    }

    /// Creates a missing property value error.
    #[must_use]
    pub fn missing_value(key: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::MissingValue {
            key: key.into(),
            position,
        })
    }

    /// Returns true if this is a lexical (tokenizer) error.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        self.kind.is_lexical()
    }

    /// Returns true if this is a structural (parser) error.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        self.kind.is_structural()
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A number literal with a second decimal point.
    #[error("malformed number at position {position}: unexpected '{character}'")]
    MalformedNumber {
        /// Character index of the offending character.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A quote opened immediately after a closing quote, as in `"x""y"`.
    ///
    /// Only directly adjacent quotes are rejected; `"x" "y"` scans as two
    /// strings.
    #[error("malformed string at position {position}: unexpected '{character}'")]
    MalformedString {
        /// Character index of the offending character.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A quoted string that is never closed before the end of the line.
    #[error("unterminated string opened with {quote} at position {position}")]
    UnterminatedString {
        /// Character index of the opening quote.
        position: usize,
        /// The opening quote character.
        quote: char,
    },

    /// A number token that is neither a valid integer nor a valid float.
    #[error("invalid number literal: {text}")]
    InvalidNumber {
        /// The literal text.
        text: String,
    },

    /// A `[` without a matching `]`.
    #[error("left bracket is never closed (token {position})")]
    UnclosedBracket {
        /// Token index where the closing bracket was expected.
        position: usize,
    },

    /// A `(` without a matching `)`.
    #[error("left parenthesis is never closed (token {position})")]
    UnclosedParenthesis {
        /// Token index where the closing parenthesis was expected.
        position: usize,
    },

    /// An assignment operator followed by neither a literal nor a boundary.
    #[error("cannot find value for property '{key}' (token {position})")]
    MissingValue {
        /// The property key.
        key: String,
        /// Token index where the value was expected.
        position: usize,
    },

    /// I/O failure while reading scripts or writing output.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A REPL command that is unknown or used incorrectly.
    #[error("command error: {0}")]
    Command(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns true for errors raised while scanning characters.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::MalformedNumber { .. }
                | Self::MalformedString { .. }
                | Self::UnterminatedString { .. }
        )
    }

    /// Returns true for errors raised while matching the token grammar.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. }
                | Self::UnclosedBracket { .. }
                | Self::UnclosedParenthesis { .. }
                | Self::MissingValue { .. }
        )
    }
}

/// Context about where an error occurred.
///
/// Carries enough of the failing line for a caller to print a diagnostic:
/// the source text, the rendered token sequence and the cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The logical line being processed.
    pub line: Option<String>,
    /// 1-based logical line number within a script.
    pub line_number: Option<usize>,
    /// Token sequence produced so far, rendered for display.
    pub tokens: Vec<String>,
    /// Cursor position (token index) at failure.
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source line.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// Sets the logical line number.
    #[must_use]
    pub fn with_line_number(mut self, number: usize) -> Self {
        self.line_number = Some(number);
        self
    }

    /// Sets the rendered token sequence.
    #[must_use]
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cursor position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.line, self.line_number) {
            (Some(line), Some(number)) => writeln!(f, "at line {number}: {line}")?,
            (Some(line), None) => writeln!(f, "at: {line}")?,
            (None, Some(number)) => writeln!(f, "at line {number}")?,
            (None, None) => {}
        }
        if let Some(position) = self.position {
            writeln!(f, "token index: {position}")?;
        }
        if !self.tokens.is_empty() {
            writeln!(f, "tokens:")?;
            for (i, token) in self.tokens.iter().enumerate() {
                let marker = if Some(i) == self.position { ">" } else { " " };
                writeln!(f, " {marker} {i:>3} {token}")?;
            }
        }
        Ok(())
    }
}
