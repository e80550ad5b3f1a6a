//! Token-to-declaration matching.
//!
//! Matchers return indices into the command's declaration lists so the
//! resolver can take a mutable borrow of the hit afterwards.

use argtree_core::Command;

/// Finds the argument a flag token names.
///
/// `--name` compares against the name and aliases, `-s` against the short
/// form only; both ignore case. A token without a dash never matches.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Command, TypeDescriptor};
/// use argtree_parser::matcher::match_by_name;
///
/// let cmd = Command::builder("create")
///     .argument(Argument::new("title", TypeDescriptor::string()).with_short('t'))
///     .build()
///     .unwrap();
///
/// assert_eq!(match_by_name(&cmd, "--TITLE"), Some(0));
/// assert_eq!(match_by_name(&cmd, "-t"), Some(0));
/// assert_eq!(match_by_name(&cmd, "-title"), None);
/// assert_eq!(match_by_name(&cmd, "title"), None);
/// ```
pub fn match_by_name(command: &Command, token: &str) -> Option<usize> {
    if let Some(name) = token.strip_prefix("--") {
        command.arguments().iter().position(|a| a.answers_to(name))
    } else if let Some(short) = token.strip_prefix('-') {
        command
            .arguments()
            .iter()
            .position(|a| a.answers_to_short(short))
    } else {
        None
    }
}

/// Finds the argument declared at exactly `position`.
pub fn match_by_position(command: &Command, position: usize) -> Option<usize> {
    command
        .arguments()
        .iter()
        .position(|a| a.position() == Some(position))
}

/// Finds the direct child whose name or alias equals `token`, ignoring case.
pub fn match_subcommand(command: &Command, token: &str) -> Option<usize> {
    command.subcommands().iter().position(|c| c.answers_to(token))
}
