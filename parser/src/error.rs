//! Parse-time error taxonomy.

use argtree_core::{ArgumentInfo, CommandInfo};
use thiserror::Error;

/// Why a raw token could not be turned into a value.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// Token outside the affirmative/negative vocabulary.
    #[error("'{0}' is not a recognised boolean")]
    InvalidBool(String),
    /// Token that does not parse as a signed 64-bit integer.
    #[error("'{0}' is not an integer")]
    InvalidInteger(String),
    /// Token that does not parse as a float.
    #[error("'{0}' is not a number")]
    InvalidFloat(String),
    /// No enumeration member matches, ignoring case.
    #[error("'{token}' is not a member of {type_name}")]
    UnknownEnumMember { token: String, type_name: String },
    /// A map entry without an unescaped `=`.
    #[error("map entry '{0}' is missing '='")]
    MissingKeyValue(String),
    /// Named entry for a parameter the constructor does not declare.
    #[error("parameter '{name}' does not exist on {type_name}")]
    UnknownParameter { name: String, type_name: String },
    /// Parameter bound twice, by name or by name after position.
    #[error("parameter '{name}' of {type_name} given more than once")]
    DuplicateParameter { name: String, type_name: String },
    /// More positional entries than the constructor has parameters.
    #[error("{type_name} takes {expected} positional value(s), {given} given")]
    TooManyArguments {
        type_name: String,
        expected: usize,
        given: usize,
    },
    /// Containers and constructors only hold scalar members.
    #[error("type {0} cannot be coerced from a single token")]
    UnsupportedType(String),
    /// The registered factory rejected its parameters.
    #[error("could not construct {type_name}: {source}")]
    Construct {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },
    /// A named argument was the last token.
    #[error("no value given")]
    MissingValue,
}

/// Errors raised while resolving tokens against a command tree.
///
/// Each variant carries a [`CommandInfo`] snapshot of the node being bound so
/// a handler can produce suggestions without access to the tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token matched neither a sub-command nor an argument.
    #[error("unknown argument '{token}' for command '{}'", command.name())]
    UnknownArgument { command: CommandInfo, token: String },

    /// Required arguments left unbound, all of them.
    #[error(
        "missing required argument(s) for command '{}': {}",
        command.name(),
        missing.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
    )]
    MissingArgument {
        command: CommandInfo,
        missing: Vec<ArgumentInfo>,
    },

    /// A matched argument's token failed coercion.
    #[error("invalid value '{value}' for argument '{}'", argument.name)]
    InvalidValue {
        command: CommandInfo,
        argument: ArgumentInfo,
        value: String,
        #[source]
        reason: CoercionError,
    },
}

impl ParseError {
    /// Snapshot of the node that raised the error.
    pub fn command(&self) -> &CommandInfo {
        match self {
            Self::UnknownArgument { command, .. }
            | Self::MissingArgument { command, .. }
            | Self::InvalidValue { command, .. } => command,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
