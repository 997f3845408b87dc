//! Parsed representation of a script line.
//!
//! A line holds the actions written inside its tag and the prose after it.
//! All values are built once by the parser and never mutated.

use std::fmt;

use bystander_foundation::Value;

/// A `key=value` pair inside a tag or a call's parameter list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    /// The identifier before the assignment operator.
    pub key: String,
    /// The assigned value, [`Value::Absent`] if omitted.
    pub value: Value,
}

impl Property {
    /// Creates a new property.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named call like `Dialog` or `Image(image="bg", fadetime=1)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// The call name.
    pub name: String,
    /// Parameter list; `None` for a bare call written without parentheses.
    pub parameters: Option<Vec<Property>>,
}

impl Call {
    /// Creates a bare call with no parameter list.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
        }
    }

    /// Creates a call with a (possibly empty) parameter list.
    #[must_use]
    pub fn with_parameters(name: impl Into<String>, parameters: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            parameters: Some(parameters),
        }
    }

    /// Looks up a parameter by key.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters
            .as_deref()?
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    /// Returns true if the name matches, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An action written inside a tag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Action {
    /// A `key=value` pair.
    Property(Property),
    /// A named call.
    Call(Call),
}

impl Action {
    /// Returns the property key or call name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Property(p) => &p.key,
            Self::Call(c) => &c.name,
        }
    }

    /// Returns the property if this action is one.
    #[must_use]
    pub const fn as_property(&self) -> Option<&Property> {
        match self {
            Self::Property(p) => Some(p),
            Self::Call(_) => None,
        }
    }

    /// Returns the call if this action is one.
    #[must_use]
    pub const fn as_call(&self) -> Option<&Call> {
        match self {
            Self::Call(c) => Some(c),
            Self::Property(_) => None,
        }
    }
}

impl From<Property> for Action {
    fn from(p: Property) -> Self {
        Self::Property(p)
    }
}

impl From<Call> for Action {
    fn from(c: Call) -> Self {
        Self::Call(c)
    }
}

/// One parsed logical line.
///
/// Both fields are `None` for a line without a tag or prose.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptLine {
    /// Actions from the line's tag, `None` if there were none.
    pub actions: Option<Vec<Action>>,
    /// Prose following the tag, `None` if there was none.
    pub actor_text: Option<String>,
}

impl ScriptLine {
    /// Creates a new parsed line.
    #[must_use]
    pub fn new(actions: Option<Vec<Action>>, actor_text: Option<String>) -> Self {
        Self {
            actions,
            actor_text,
        }
    }

    /// Creates a line holding only prose.
    #[must_use]
    pub fn prose(text: impl Into<String>) -> Self {
        Self::new(None, Some(text.into()))
    }

    /// Returns true if the line has neither actions nor prose.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.actions.is_none() && self.actor_text.is_none()
    }

    /// Iterates over the line's actions.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().flatten()
    }

    /// Finds the first property with the given key.
    #[must_use]
    pub fn find_property(&self, key: &str) -> Option<&Property> {
        self.actions()
            .filter_map(Action::as_property)
            .find(|p| p.key == key)
    }

    /// Finds the first call with the given name, ignoring ASCII case.
    #[must_use]
    pub fn find_call(&self, name: &str) -> Option<&Call> {
        self.actions()
            .filter_map(Action::as_call)
            .find(|c| c.is_named(name))
    }

    /// Returns the value of the `name` property, if present.
    #[must_use]
    pub fn speaker(&self) -> Option<&Value> {
        self.find_property("name").map(|p| &p.value)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.key)?;
        match &self.value {
            Value::Absent => Ok(()),
            Value::String(s) if s.contains('"') => write!(f, "'{s}'"),
            Value::String(s) => write!(f, "\"{s}\""),
            value => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(parameters) = &self.parameters {
            write!(f, "(")?;
            write_joined(f, parameters)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(p) => write!(f, "{p}"),
            Self::Call(c) => write!(f, "{c}"),
        }
    }
}

/// Renders the line back to tag syntax.
impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(actions) = &self.actions {
            write!(f, "[")?;
            write_joined(f, actions)?;
            write!(f, "]")?;
        }
        if let Some(text) = &self.actor_text {
            write!(f, "{text}")?;
        }
        Ok(())
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
