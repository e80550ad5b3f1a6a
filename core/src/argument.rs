//! Argument declarations.

use std::fmt;

use crate::info::ArgumentInfo;
use crate::types::{TypeDescriptor, Value};

/// A typed argument declared on a command.
///
/// Arguments are addressed by name (`--name`, any alias, or `-s` for the
/// short form) and optionally by position. An argument without a default is
/// required unless marked [`optional`](Argument::optional); an argument with
/// a default is never required.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, TypeDescriptor, Value};
///
/// let title = Argument::new("title", TypeDescriptor::string())
///     .with_display_name("Title")
///     .with_short('t');
/// assert!(title.is_required());
///
/// let count = Argument::new("count", TypeDescriptor::integer()).with_default(0);
/// assert!(!count.is_required());
/// assert_eq!(count.value(), Some(&Value::Integer(0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    display_name: String,
    description: String,
    ty: TypeDescriptor,
    aliases: Vec<String>,
    short: Option<char>,
    position: Option<usize>,
    required: bool,
    value: Option<Value>,
    default: Option<Value>,
}

impl Argument {
    /// Declares a required argument; the display name defaults to `name`.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: String::new(),
            ty,
            aliases: Vec::new(),
            short: None,
            position: None,
            required: true,
            value: None,
            default: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds an alias matched with the `--` prefix. Duplicates are ignored.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Makes the argument positional at slot `position`.
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Marks the argument as not required.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets a default, copied into the value slot. Clears `required`.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.value = Some(default.clone());
        self.default = Some(default);
        self.required = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Binds a resolved value.
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// True for boolean arguments, which may appear without a value.
    pub fn is_flag(&self) -> bool {
        self.ty.is_bool()
    }

    /// Case-insensitive comparison against the name and every alias.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.name.to_lowercase() == name || self.aliases.iter().any(|a| a.to_lowercase() == name)
    }

    /// Case-insensitive comparison against the short form only.
    pub fn answers_to_short(&self, short: &str) -> bool {
        self.short
            .is_some_and(|s| s.to_lowercase().eq(short.to_lowercase().chars()))
    }

    pub fn info(&self) -> ArgumentInfo {
        ArgumentInfo {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            position: self.position,
            required: self.required,
            short: self.short,
            type_name: self.ty.type_name(),
            aliases: self.aliases.clone(),
            choices: self.ty.choices().to_vec(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        }
    }
}
