//! Edit-distance suggestions for unmatched tokens.
//!
//! Suggestions keep declaration order; they are filtered, never ranked.

use argtree_core::{ArgumentInfo, CommandIdentity};
use strsim::levenshtein;

/// Largest edit distance still offered as a suggestion.
pub const SUGGESTION_CUTOFF: usize = 2;

/// Arguments whose name is within [`SUGGESTION_CUTOFF`] of `token`.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, TypeDescriptor};
/// use argtree_parser::suggest_arguments;
///
/// let declared = vec![
///     Argument::new("chrono", TypeDescriptor::string()).info(),
///     Argument::new("count", TypeDescriptor::integer()).info(),
/// ];
/// let hits = suggest_arguments("--chrno", &declared);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "chrono");
/// ```
pub fn suggest_arguments<'a>(token: &str, candidates: &'a [ArgumentInfo]) -> Vec<&'a ArgumentInfo> {
    let needle = normalize(token);
    candidates
        .iter()
        .filter(|a| is_close(&needle, &a.name))
        .collect()
}

/// Sub-commands whose name is within [`SUGGESTION_CUTOFF`] of `token`.
pub fn suggest_subcommands<'a>(
    token: &str,
    candidates: &'a [CommandIdentity],
) -> Vec<&'a CommandIdentity> {
    let needle = normalize(token);
    candidates
        .iter()
        .filter(|c| is_close(&needle, &c.name))
        .collect()
}

fn normalize(token: &str) -> String {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token)
        .to_lowercase()
}

fn is_close(needle: &str, name: &str) -> bool {
    levenshtein(needle, &name.to_lowercase()) <= SUGGESTION_CUTOFF
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> CommandIdentity {
        CommandIdentity {
            name: name.to_string(),
            display_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_strips_one_prefix() {
        assert_eq!(normalize("--Chrono"), "chrono");
        assert_eq!(normalize("-C"), "c");
        assert_eq!(normalize("---x"), "-x");
        assert_eq!(normalize("plain"), "plain");
    }

    #[test]
    fn test_subcommands_keep_declaration_order() {
        let declared = vec![identity("stop"), identity("start"), identity("status")];
        let names: Vec<&str> = suggest_subcommands("stat", &declared)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["stop", "start", "status"]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let declared = vec![identity("abcd")];
        assert_eq!(suggest_subcommands("ab", &declared).len(), 1);
        assert!(suggest_subcommands("a", &declared).is_empty());
    }
}
