//! Syntax highlighting for the REPL.

use std::borrow::Cow;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const STRING: &str = "\x1b[33m"; // yellow
const NUMBER: &str = "\x1b[35m"; // magenta
const BOOL: &str = "\x1b[34m"; // blue
const IDENTIFIER: &str = "\x1b[36m"; // cyan
const PROSE: &str = "\x1b[3m"; // italic

/// Highlighter for tag syntax.
///
/// Follows the tokenizer's rules: a line that does not open with `[` is
/// prose, and so is everything after the closing `]`.
pub struct TagHighlighter {}

impl TagHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    ///
    /// Multi-line input is highlighted one physical line at a time.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        for (i, physical) in line.split('\n').enumerate() {
            if i > 0 {
                result.push('\n');
            }
            highlight_physical(physical, &mut result);
        }
        Cow::Owned(result)
    }
}

impl Default for TagHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn highlight_physical(line: &str, result: &mut String) {
    let mut chars = line.chars().peekable();
    let mut started = false;

    while let Some(c) = chars.next() {
        if !started {
            if c.is_whitespace() {
                result.push(c);
                continue;
            }
            started = true;
            if c != '[' {
                push_prose(c, &mut chars, result);
                return;
            }
        }

        match c {
            '[' | '(' | ')' => {
                result.push_str(BOLD);
                result.push(c);
                result.push_str(RESET);
            }

            ']' => {
                result.push_str(BOLD);
                result.push(c);
                result.push_str(RESET);
                if let Some(next) = chars.next() {
                    push_prose(next, &mut chars, result);
                }
                return;
            }

            // Strings
            '"' | '\'' => {
                result.push_str(STRING);
                result.push(c);
                for next in chars.by_ref() {
                    result.push(next);
                    if next == c {
                        break;
                    }
                }
                result.push_str(RESET);
            }

            // Numbers
            c if c.is_ascii_digit() || c == '+' || c == '-' => {
                result.push_str(NUMBER);
                result.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        result.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                result.push_str(RESET);
            }

            c if c.is_whitespace() || matches!(c, ',' | '=' | ':') => result.push(c),

            // Identifiers and bools
            c => {
                let mut word = String::new();
                word.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || "[]()=,:\"'".contains(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }

                let color = if word == "true" || word == "false" {
                    BOOL
                } else {
                    IDENTIFIER
                };
                result.push_str(color);
                result.push_str(&word);
                result.push_str(RESET);
            }
        }
    }
}

fn push_prose(first: char, rest: &mut impl Iterator<Item = char>, result: &mut String) {
    result.push_str(PROSE);
    result.push(first);
    result.extend(rest);
    result.push_str(RESET);
}
