//! Token resolution against a command tree.
//!
//! Resolution walks down the tree while the first remaining token names a
//! child, then binds the rest of the tokens to the selected node's arguments
//! in one left-to-right scan, and finally checks that every required argument
//! received a value. Any failure stops the walk.

use argtree_core::{Argument, ArgumentInfo, Command, Context, Value};
use tracing::debug;

use crate::coerce::convert;
use crate::error::{CoercionError, ParseError, Result};
use crate::matcher::{match_by_name, match_by_position, match_subcommand};

/// Resolves `tokens` against `root` and returns the selected node.
///
/// Every node on the routed path gets a [`Context`]; the selected node's
/// scoped arguments are the tokens left after routing, intermediate nodes
/// record an empty slice. Argument values are written in place.
///
/// # Errors
///
/// - [`ParseError::UnknownArgument`] when a token matches neither a child, a
///   named argument, nor the next positional slot.
/// - [`ParseError::InvalidValue`] when a value fails coercion, or a
///   non-boolean named argument is the last token.
/// - [`ParseError::MissingArgument`] listing every required argument left
///   unbound.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Command, TypeDescriptor, Value};
/// use argtree_parser::resolve;
///
/// let mut root = Command::builder("app")
///     .argument(Argument::new("count", TypeDescriptor::integer()))
///     .build()
///     .unwrap();
///
/// let tokens = vec!["--count".to_string(), "5545".to_string()];
/// let selected = resolve(&mut root, &tokens).unwrap();
/// assert_eq!(selected.value("count"), Some(&Value::Integer(5545)));
/// ```
pub fn resolve<'c>(root: &'c mut Command, tokens: &[String]) -> Result<&'c mut Command> {
    let context = Context::for_root(root, tokens);
    resolve_node(root, context, tokens)
}

fn resolve_node<'c>(
    command: &'c mut Command,
    context: Context,
    tokens: &[String],
) -> Result<&'c mut Command> {
    let routed = tokens
        .first()
        .and_then(|token| match_subcommand(command, token));

    if let Some(index) = routed {
        let child_context = context.for_child(command, &command.subcommands()[index]);
        debug!(
            from = command.name(),
            to = command.subcommands()[index].name(),
            "Routing to sub-command"
        );
        command.set_context(context.with_scoped_arguments(&[]));
        let child = &mut command.subcommands_mut()[index];
        return resolve_node(child, child_context, &tokens[1..]);
    }

    debug!(command = command.name(), tokens = ?tokens, "Binding arguments");
    command.set_context(context.with_scoped_arguments(tokens));
    bind_arguments(command, tokens)?;
    check_required(command)?;
    Ok(command)
}

fn bind_arguments(command: &mut Command, tokens: &[String]) -> Result<()> {
    let mut i = 0;
    let mut position = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if let Some(index) = match_by_name(command, token) {
            let next = tokens.get(i + 1);

            // A flag followed by nothing or by another dash token is set
            // without consuming anything. This includes negative numbers.
            if command.arguments()[index].is_flag() && next.is_none_or(|n| n.starts_with('-')) {
                set_value(command, index, Value::Bool(true));
                i += 1;
                continue;
            }

            let Some(raw) = next else {
                return Err(invalid_value(
                    command,
                    index,
                    String::new(),
                    CoercionError::MissingValue,
                ));
            };
            bind_value(command, index, raw)?;
            i += 2;
            continue;
        }

        if let Some(index) = match_by_position(command, position) {
            bind_value(command, index, token)?;
            position += 1;
            i += 1;
            continue;
        }

        return Err(ParseError::UnknownArgument {
            command: command.info(),
            token: token.clone(),
        });
    }

    Ok(())
}

fn bind_value(command: &mut Command, index: usize, raw: &str) -> Result<()> {
    match convert(raw, command.arguments()[index].ty()) {
        Ok(value) => {
            set_value(command, index, value);
            Ok(())
        }
        Err(reason) => Err(invalid_value(command, index, raw.to_string(), reason)),
    }
}

fn set_value(command: &mut Command, index: usize, value: Value) {
    if let Some(argument) = command.argument_mut(index) {
        debug!(argument = argument.name(), value = %value, "Bound argument");
        argument.set_value(value);
    }
}

fn invalid_value(command: &Command, index: usize, value: String, reason: CoercionError) -> ParseError {
    ParseError::InvalidValue {
        command: command.info(),
        argument: command.arguments()[index].info(),
        value,
        reason,
    }
}

fn check_required(command: &Command) -> Result<()> {
    let missing: Vec<ArgumentInfo> = command
        .arguments()
        .iter()
        .filter(|a| a.is_required() && !a.is_bound())
        .map(Argument::info)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParseError::MissingArgument {
            command: command.info(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtree_core::TypeDescriptor;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_before_other_flag_is_not_consumed() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("verbose", TypeDescriptor::bool()))
            .argument(Argument::new("name", TypeDescriptor::string()))
            .build()
            .unwrap();

        let selected = resolve(&mut cmd, &tokens(&["--verbose", "--name", "x"])).unwrap();
        assert_eq!(selected.value("verbose"), Some(&Value::Bool(true)));
        assert_eq!(selected.value("name"), Some(&Value::from("x")));
    }

    #[test]
    fn test_flag_consumes_explicit_value() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("verbose", TypeDescriptor::bool()))
            .build()
            .unwrap();

        let selected = resolve(&mut cmd, &tokens(&["--verbose", "nah"])).unwrap();
        assert_eq!(selected.value("verbose"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_flag_treats_negative_number_as_flag() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("verbose", TypeDescriptor::bool()))
            .argument(Argument::new("offset", TypeDescriptor::integer()).at_position(0))
            .build()
            .unwrap();

        let selected = resolve(&mut cmd, &tokens(&["--verbose", "-5"])).unwrap();
        assert_eq!(selected.value("verbose"), Some(&Value::Bool(true)));
        assert_eq!(selected.value("offset"), Some(&Value::Integer(-5)));
    }

    #[test]
    fn test_trailing_named_argument_without_value() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("name", TypeDescriptor::string()))
            .build()
            .unwrap();

        let err = resolve(&mut cmd, &tokens(&["--name"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidValue {
                reason: CoercionError::MissingValue,
                ..
            }
        ));
    }

    #[test]
    fn test_named_beats_positional() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("first", TypeDescriptor::string()).at_position(0))
            .argument(Argument::new("second", TypeDescriptor::string()).at_position(1))
            .build()
            .unwrap();

        let selected = resolve(&mut cmd, &tokens(&["--second", "b", "a"])).unwrap();
        assert_eq!(selected.value("first"), Some(&Value::from("a")));
        assert_eq!(selected.value("second"), Some(&Value::from("b")));
    }

    #[test]
    fn test_unknown_after_positionals_exhausted() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("first", TypeDescriptor::string()).at_position(0))
            .build()
            .unwrap();

        let err = resolve(&mut cmd, &tokens(&["a", "b"])).unwrap_err();
        assert!(matches!(err, ParseError::UnknownArgument { ref token, .. } if token == "b"));
    }

    #[test]
    fn test_invalid_value_carries_argument_and_token() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("count", TypeDescriptor::integer()))
            .build()
            .unwrap();

        match resolve(&mut cmd, &tokens(&["--count", "many"])) {
            Err(ParseError::InvalidValue {
                argument, value, ..
            }) => {
                assert_eq!(argument.name, "count");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_root_context_when_not_routed() {
        let mut cmd = Command::builder("t")
            .argument(Argument::new("a", TypeDescriptor::string()).optional())
            .build()
            .unwrap();

        let input = tokens(&["--a", "1"]);
        let selected = resolve(&mut cmd, &input).unwrap();
        let context = selected.context();
        assert!(context.parent().is_none());
        assert_eq!(context.root().map(|r| r.name.as_str()), Some("t"));
        assert_eq!(context.scoped_arguments(), input.as_slice());
        assert_eq!(context.original_arguments(), input.as_slice());
    }
}
