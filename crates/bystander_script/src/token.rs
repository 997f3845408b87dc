//! Token types for story script lines.
//!
//! Tokens are the output of the tokenizer and input to the parser.

use std::fmt;

/// A token from lexical analysis.
///
/// The kind tag and the literal text are kept apart: punctuation tokens carry
/// their character as text, literals carry their source text unconverted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The type of this token.
    pub kind: TokenKind,
    /// The literal text of this token.
    pub text: String,
    /// Character index in the line where this token starts.
    pub position: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Returns true if this token terminates a value, property, or call.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.kind.is_boundary()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind.name(), self.text)
    }
}

/// Token types for story script lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenKind {
    // Punctuation
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `=`
    Equal,
    /// `:`
    Colon,

    // Literals
    /// `true` or `false`
    Bool,
    /// Number literal like `10`, `-3` or `0.1`
    Number,
    /// Quoted string literal (quotes stripped)
    String,
    /// Bare word like `name` or `HEADER`
    Identifier,

    // Prose
    /// Free text following the tag, trimmed
    ActorText,

    /// Placeholder kind; never emitted by the tokenizer
    #[default]
    Unknown,
}

impl TokenKind {
    /// Returns the kind for a punctuation character, if it is one.
    #[must_use]
    pub const fn punctuation(c: char) -> Option<Self> {
        match c {
            '[' => Some(Self::LBracket),
            ']' => Some(Self::RBracket),
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            ',' => Some(Self::Comma),
            '=' => Some(Self::Equal),
            ':' => Some(Self::Colon),
            _ => None,
        }
    }

    /// Returns true for `,`, `]` and `)`.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(self, Self::Comma | Self::RBracket | Self::RParen)
    }

    /// Returns true for `=` and `:`.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::Equal | Self::Colon)
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Comma => "','",
            Self::Equal => "'='",
            Self::Colon => "':'",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::ActorText => "actor_text",
            Self::Unknown => "unknown",
        }
    }
}
