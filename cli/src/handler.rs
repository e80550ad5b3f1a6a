//! Turning runner errors into user-facing diagnostics.

use argtree_core::ArgumentInfo;
use argtree_parser::{CoercionError, ParseError, suggest_arguments, suggest_subcommands};

use crate::config::RunnerConfig;
use crate::error::CliError;

/// Receives every [`CliError`] the runner catches.
pub trait ErrorHandler {
    fn handle(&self, error: &CliError);
}

/// Writes plain-text diagnostics to stderr.
///
/// # Examples
///
/// ```
/// use argtree_cli::{CliError, DefaultErrorHandler};
/// use argtree_core::{Argument, Command, TypeDescriptor};
/// use argtree_parser::resolve;
///
/// let mut cmd = Command::builder("app")
///     .argument(Argument::new("chrono", TypeDescriptor::string()).with_display_name("Chrono"))
///     .build()
///     .unwrap();
/// let err = resolve(&mut cmd, &["--chrno".to_string()]).unwrap_err();
///
/// let lines = DefaultErrorHandler::default().diagnostics(&CliError::from(err));
/// assert_eq!(lines, vec!["Unknown argument '--chrno'", "Do you mean:", "  Chrono (--chrono)"]);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultErrorHandler {
    suggestions: bool,
}

impl Default for DefaultErrorHandler {
    fn default() -> Self {
        Self { suggestions: true }
    }
}

impl DefaultErrorHandler {
    pub fn new(suggestions: bool) -> Self {
        Self { suggestions }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.suggestions)
    }

    /// Lines describing `error`, without trailing newlines.
    pub fn diagnostics(&self, error: &CliError) -> Vec<String> {
        match error {
            CliError::Validation(err) => vec![err.to_string()],
            CliError::Parse(err) => self.parse_diagnostics(err),
        }
    }

    fn parse_diagnostics(&self, error: &ParseError) -> Vec<String> {
        let mut lines = Vec::new();

        match error {
            ParseError::UnknownArgument { command, token } if token.starts_with("--") => {
                lines.push(format!("Unknown argument '{token}'"));
                if self.suggestions {
                    let hits: Vec<String> = suggest_arguments(token, &command.arguments)
                        .into_iter()
                        .map(argument_line)
                        .collect();
                    push_suggestions(&mut lines, hits);
                }
            }
            ParseError::UnknownArgument { command, token } => {
                lines.push(format!("Unknown command '{token}'"));
                if self.suggestions {
                    let hits: Vec<String> = suggest_subcommands(token, &command.sub_commands)
                        .into_iter()
                        .map(|c| format!("  {} ({})", c.display_name, c.name))
                        .collect();
                    push_suggestions(&mut lines, hits);
                }
            }
            ParseError::MissingArgument { missing, .. } => {
                lines.push(if missing.len() == 1 {
                    "Missing one required argument".to_string()
                } else {
                    "Missing multiple required arguments".to_string()
                });
                lines.extend(missing.iter().map(argument_line));
            }
            ParseError::InvalidValue {
                argument,
                reason: CoercionError::MissingValue,
                ..
            } => {
                lines.push(format!(
                    "No value given for argument {}",
                    argument.display_name
                ));
            }
            ParseError::InvalidValue {
                argument, reason, ..
            } => {
                lines.push(format!(
                    "Invalid value given for argument {}",
                    argument.display_name
                ));
                lines.push(value_hint(argument, reason));
            }
        }

        lines
    }
}

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, error: &CliError) {
        for line in self.diagnostics(error) {
            eprintln!("{line}");
        }
    }
}

/// Hint for a rejected value. Enumerations list their members whatever their type name.
fn value_hint(argument: &ArgumentInfo, reason: &CoercionError) -> String {
    if !argument.choices.is_empty() {
        return format!("Valid values are {}", argument.choices.join(", "));
    }
    match reason {
        CoercionError::InvalidBool(_) => "Valid values are 'true' or 'false'".to_string(),
        CoercionError::InvalidInteger(_) => "Expected an integer".to_string(),
        CoercionError::InvalidFloat(_) => "Expected a number".to_string(),
        other => other.to_string(),
    }
}

fn argument_line(argument: &ArgumentInfo) -> String {
    format!("  {} (--{})", argument.display_name, argument.name)
}

fn push_suggestions(lines: &mut Vec<String>, hits: Vec<String>) {
    if !hits.is_empty() {
        lines.push("Do you mean:".to_string());
        lines.extend(hits);
    }
}
