//! Parser for story script lines.
//!
//! Recursive descent over a line's tokens with backtracking:
//!
//! ```text
//! ScriptLine := Expression ActorText?
//! Expression := '[' Expression ']' | Actions
//! Actions    := Call | Property (',' Property)*
//! Call       := Identifier '='? '(' (Property (',' Property)*)? ')'
//!             | Identifier                  -- followed by a boundary
//! Property   := Identifier ('=' | ':') Value?  -- value omitted before a boundary
//! Value      := String | Bool | Number
//! ```
//!
//! Every rule takes the cursor position it starts at and returns the position
//! after what it consumed. A rule that does not apply returns `Ok(None)`, and
//! the caller retries another alternative from its own saved position. `Err`
//! is reserved for malformed input and aborts the whole line.

use bystander_foundation::{Error, ErrorContext, ErrorKind, Result, Value};

use crate::ast::{Action, Call, Property, ScriptLine};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// Outcome of a grammar rule: no match, or the matched node and the next position.
type Match<T> = Result<Option<(T, usize)>>;

/// Parser for the tokens of one logical line.
///
/// The parser holds no cursor of its own, so [`Parser::parse`] can be called
/// any number of times with the same result.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'t> {
    /// Tokens being parsed.
    tokens: &'t [Token],
}

impl<'t> Parser<'t> {
    /// Creates a new parser over the given tokens.
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self { tokens }
    }

    /// Parses the tokens into a script line.
    ///
    /// # Errors
    /// Returns a structural error if a bracket or parenthesis is never
    /// closed, or a property's value cannot be found. The error context
    /// carries the token sequence and the cursor position.
    pub fn parse(&self) -> Result<ScriptLine> {
        let (actions, pos) = self.expression(0)?;
        let actor_text = self.actor_text(pos).map(|(text, _)| text);
        Ok(ScriptLine::new(actions, actor_text))
    }

    /// `'[' Expression ']' | Actions`
    ///
    /// Nesting is unrolled: every opening bracket is counted, the actions are
    /// parsed once, and the same number of closing brackets must follow.
    fn expression(&self, mut pos: usize) -> Result<(Option<Vec<Action>>, usize)> {
        let mut depth = 0usize;
        while let Some(next) = self.eat(pos, TokenKind::LBracket) {
            depth += 1;
            pos = next;
        }

        let (actions, mut pos) = self.actions(pos)?;
        for _ in 0..depth {
            match self.eat(pos, TokenKind::RBracket) {
                Some(next) => pos = next,
                None => return Err(self.fail(Error::unclosed_bracket(pos), pos)),
            }
        }
        Ok((actions, pos))
    }

    /// `Call | Property (',' Property)*`
    fn actions(&self, pos: usize) -> Result<(Option<Vec<Action>>, usize)> {
        if let Some((call, pos)) = self.call(pos)? {
            return Ok((Some(vec![Action::Call(call)]), pos));
        }

        let (properties, pos) = self.property_list(pos)?;
        let actions: Vec<Action> = properties.into_iter().map(Action::Property).collect();
        Ok(((!actions.is_empty()).then_some(actions), pos))
    }

    /// `Identifier '='? '(' properties ')'`, or a bare `Identifier` before a boundary.
    fn call(&self, pos: usize) -> Match<Call> {
        let Some((name, after_name)) = self.identifier(pos) else {
            return Ok(None);
        };
        let after_equal = self.eat(after_name, TokenKind::Equal).unwrap_or(after_name);

        let Some(inner) = self.eat(after_equal, TokenKind::LParen) else {
            if self.is_boundary(after_equal) {
                return Ok(Some((Call::bare(name), after_equal)));
            }
            return Ok(None);
        };

        let (parameters, pos) = self.property_list(inner)?;
        match self.eat(pos, TokenKind::RParen) {
            Some(pos) => Ok(Some((Call::with_parameters(name, parameters), pos))),
            None => Err(self.fail(Error::unclosed_parenthesis(pos), pos)),
        }
    }

    /// `Property (',' Property)*`, possibly empty.
    fn property_list(&self, mut pos: usize) -> Result<(Vec<Property>, usize)> {
        let mut properties = Vec::new();
        while let Some((property, next)) = self.property(pos)? {
            properties.push(property);
            pos = next;
            match self.eat(pos, TokenKind::Comma) {
                Some(next) => pos = next,
                None => break,
            }
        }
        Ok((properties, pos))
    }

    /// `Identifier ('=' | ':') Value?`
    fn property(&self, pos: usize) -> Match<Property> {
        let Some((key, pos)) = self.identifier(pos) else {
            return Ok(None);
        };
        let Some(pos) = self.assignment(pos) else {
            return Ok(None);
        };

        let Some(token) = self.tokens.get(pos) else {
            return Err(self.fail(Error::missing_value(key, pos), pos));
        };

        let value = match token.kind {
            TokenKind::String => Value::String(token.text.clone()),
            TokenKind::Bool => Value::Bool(token.text == "true"),
            TokenKind::Number => number_value(&token.text).map_err(|e| self.fail(e, pos))?,
            // The boundary belongs to the caller.
            kind if kind.is_boundary() => return Ok(Some((Property::new(key, Value::Absent), pos))),
            _ => return Err(self.fail(Error::missing_value(key, pos), pos)),
        };

        Ok(Some((Property::new(key, value), pos + 1)))
    }

    /// Consumes an identifier.
    fn identifier(&self, pos: usize) -> Option<(String, usize)> {
        self.tokens
            .get(pos)
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| (t.text.clone(), pos + 1))
    }

    /// Consumes the trailing prose.
    fn actor_text(&self, pos: usize) -> Option<(String, usize)> {
        self.tokens
            .get(pos)
            .filter(|t| t.kind == TokenKind::ActorText)
            .map(|t| (t.text.clone(), pos + 1))
    }

    /// Consumes `=` or `:`.
    fn assignment(&self, pos: usize) -> Option<usize> {
        self.tokens
            .get(pos)
            .filter(|t| t.kind.is_assignment())
            .map(|_| pos + 1)
    }

    /// Consumes a token of the given kind.
    fn eat(&self, pos: usize, kind: TokenKind) -> Option<usize> {
        self.tokens
            .get(pos)
            .filter(|t| t.kind == kind)
            .map(|_| pos + 1)
    }

    /// Checks for a boundary token without consuming it.
    fn is_boundary(&self, pos: usize) -> bool {
        self.tokens.get(pos).is_some_and(Token::is_boundary)
    }

    /// Attaches the token sequence and cursor position to an error.
    fn fail(&self, error: Error, pos: usize) -> Error {
        error.map_context(|ctx: ErrorContext| {
            ctx.with_tokens(self.tokens.iter().map(ToString::to_string))
                .with_position(pos)
        })
    }
}

/// Converts number token text: a `.` makes it a float, otherwise an integer.
fn number_value(text: &str) -> Result<Value> {
    let value = if text.contains('.') {
        text.parse::<f64>().ok().map(Value::Float)
    } else {
        text.parse::<i64>().ok().map(Value::Int)
    };
    value.ok_or_else(|| {
        Error::new(ErrorKind::InvalidNumber {
            text: text.to_string(),
        })
    })
}

/// Parses a line's tokens.
///
/// # Errors
/// See [`Parser::parse`].
pub fn parse(tokens: &[Token]) -> Result<ScriptLine> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses one logical line.
///
/// Errors from either stage carry the source line in their context.
///
/// # Errors
/// Returns the lexical or structural error for a malformed line.
pub fn parse_line(line: &str) -> Result<ScriptLine> {
    let tokens = tokenize(line)?;
    parse(&tokens).map_err(|e| e.map_context(|ctx| ctx.with_line(line)))
}
