//! Serializable snapshots of the command tree.
//!
//! These carry declarations without runtime state (values, handlers). Parse
//! errors embed them so a handler can print diagnostics and suggestions after
//! the tree itself is out of reach, and the built-in help command serializes
//! them to JSON.

use serde::{Deserialize, Serialize};

/// Identity of a command node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandIdentity {
    /// Routing name, matched case-insensitively.
    pub name: String,
    /// Human-facing name used in help and diagnostics.
    pub display_name: String,
    /// One-line description shown in help.
    pub description: String,
    /// Alternative routing names.
    pub aliases: Vec<String>,
}

/// Declaration of one argument.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, TypeDescriptor};
///
/// let info = Argument::new("count", TypeDescriptor::integer())
///     .with_short('c')
///     .info();
/// let json = serde_json::to_value(&info).unwrap();
/// assert_eq!(json["type"], "int");
/// assert_eq!(json["short"], "c");
/// assert_eq!(json["required"], true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    /// Long name, matched after `--`.
    pub name: String,
    /// Human-facing name used in help and diagnostics.
    pub display_name: String,
    /// One-line description shown in help.
    pub description: String,
    /// Positional slot, if the argument can be given by position.
    pub position: Option<usize>,
    /// True when the argument has neither a default nor an optional marker.
    pub required: bool,
    /// Single-character form, matched after `-`.
    pub short: Option<char>,
    /// Human-readable type name (`int`, `list<string>`, ...).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Alternative long names.
    pub aliases: Vec<String>,
    /// Enumeration members, empty for other types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// Declaration of a command: identity, arguments, and direct children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    #[serde(flatten)]
    pub identity: CommandIdentity,
    pub arguments: Vec<ArgumentInfo>,
    pub sub_commands: Vec<CommandIdentity>,
}

impl CommandInfo {
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Finds an argument by exact name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentInfo> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Application metadata carried by a root command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// Printed by the `version` built-in.
    pub version: String,
    pub author: String,
    pub website: String,
    pub copyright: String,
}

impl ApplicationInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_info_flattens_identity() {
        let info = CommandInfo {
            identity: CommandIdentity {
                name: "create".into(),
                display_name: "Create".into(),
                description: "Create a thing".into(),
                aliases: vec!["new".into()],
            },
            arguments: Vec::new(),
            sub_commands: Vec::new(),
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "create");
        assert_eq!(json["aliases"][0], "new");
        assert!(json["sub_commands"].as_array().unwrap().is_empty());

        let back: CommandInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn test_argument_info_omits_empty_choices() {
        let info = ArgumentInfo {
            name: "title".into(),
            display_name: "Title".into(),
            description: String::new(),
            position: Some(0),
            required: true,
            short: None,
            type_name: "string".into(),
            aliases: Vec::new(),
            choices: Vec::new(),
        };

        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("choices").is_none());
        assert_eq!(json["position"], 0);
    }
}
