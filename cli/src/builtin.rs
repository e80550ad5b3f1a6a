//! Built-in `help`, `version` and `info` commands.
//!
//! These are ordinary commands with handlers; attach them to any node with
//! [`CommandBuilder::help_command`](argtree_core::CommandBuilder::help_command)
//! or [`CommandBuilder::subcommand`](argtree_core::CommandBuilder::subcommand).
//! A help command describes its parent, or itself when it has none.

use argtree_core::{
    ApplicationInfo, Argument, ArgumentInfo, Command, CommandIdentity, EnumType, HandlerResult,
    Invocation, TypeDescriptor, ValidationError, Value,
};
use serde::Serialize;

/// Output formats accepted by `help --format`.
pub const HELP_FORMATS: [&str; 2] = ["std", "json"];

/// Everything the help command knows about a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpData {
    pub command: CommandIdentity,
    pub arguments: Vec<ArgumentInfo>,
    pub sub_commands: Vec<CommandIdentity>,
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationInfo>,
}

impl HelpData {
    /// Describes `command`, taking application metadata from `root`.
    pub fn new(command: &Command, root: &Command) -> Self {
        let info = command.info();
        Self {
            command: info.identity,
            arguments: info.arguments,
            sub_commands: info.sub_commands,
            usage: usage(command),
            application: root.application().cloned(),
        }
    }

    /// Keeps entries whose name or display name contains `filter` (ignoring
    /// case) and, with `required_only`, only required arguments.
    pub fn filtered(mut self, filter: &str, required_only: bool) -> Self {
        let filter = filter.to_lowercase();
        let matches = |name: &str, display: &str| {
            name.to_lowercase().contains(&filter) || display.to_lowercase().contains(&filter)
        };

        self.arguments
            .retain(|a| matches(&a.name, &a.display_name) && (!required_only || a.required));
        self.sub_commands
            .retain(|c| matches(&c.name, &c.display_name));
        self
    }
}

/// Usage line for `command`.
///
/// The full command path, `[command]` when the node has children besides its
/// help child, `<name>` per positional argument in order, and `[arguments]`
/// when any argument is named-only.
pub fn usage(command: &Command) -> String {
    let path = command.context().path();
    let mut parts = vec![if path.is_empty() {
        command.name().to_string()
    } else {
        path.join(" ")
    }];

    let help_children = usize::from(command.help_command().is_some());
    if command.subcommands().len() > help_children {
        parts.push("[command]".to_string());
    }
    parts.extend(
        command
            .positional_arguments()
            .into_iter()
            .map(|a| format!("<{}>", a.name())),
    );
    if command.arguments().iter().any(|a| a.position().is_none()) {
        parts.push("[arguments]".to_string());
    }

    parts.join(" ")
}

/// Plain-text rendering of [`HelpData`].
pub fn render_text(data: &HelpData) -> String {
    let mut lines = vec![data.command.display_name.clone()];
    if !data.command.description.is_empty() {
        lines.push(data.command.description.clone());
    }
    lines.push(String::new());
    lines.push(format!("Usage: {}", data.usage));

    if !data.arguments.is_empty() {
        lines.push(String::new());
        lines.push("Arguments:".to_string());
        for argument in &data.arguments {
            let mut names = format!("--{}", argument.name);
            if let Some(short) = argument.short {
                names.push_str(&format!(", -{short}"));
            }
            let mut line = format!("  {names} <{}>  {}", argument.type_name, argument.display_name);
            if !argument.description.is_empty() {
                line.push_str(&format!(": {}", argument.description));
            }
            if argument.required {
                line.push_str(" (required)");
            }
            lines.push(line);
        }
    }

    if !data.sub_commands.is_empty() {
        lines.push(String::new());
        lines.push("Commands:".to_string());
        for sub in &data.sub_commands {
            let mut line = format!("  {}", sub.name);
            if !sub.description.is_empty() {
                line.push_str(&format!("  {}", sub.description));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn help_builder() -> argtree_core::CommandBuilder {
    let format = EnumType::new("HelpFormat", HELP_FORMATS);
    Command::builder("help")
        .display_name("Help")
        .description("Show help for a command")
        .argument(
            Argument::new("format", TypeDescriptor::enumeration(format))
                .with_display_name("Format")
                .with_description("Output format")
                .with_short('f')
                .with_default(Value::Enum("std".to_string())),
        )
        .argument(
            Argument::new("filter", TypeDescriptor::string())
                .with_display_name("Filter")
                .with_description("Only show entries whose name contains this text")
                .with_default(""),
        )
        .argument(
            Argument::new("required-only", TypeDescriptor::bool())
                .with_display_name("Required only")
                .with_description("Only show required arguments")
                .with_default(false),
        )
        .handler(run_help)
}

/// The `help` command, with a help child of its own that has none.
///
/// # Errors
///
/// Propagates [`ValidationError`] from building the nodes.
pub fn help_command() -> Result<Command, ValidationError> {
    help_builder().help_command(help_builder().build()?).build()
}

/// The `version` command, printing the root's application version.
pub fn version_command() -> Result<Command, ValidationError> {
    Command::builder("version")
        .display_name("Version")
        .description("Show the application version")
        .handler(run_version)
        .build()
}

/// The `info` command, printing the root's application metadata.
pub fn info_command() -> Result<Command, ValidationError> {
    Command::builder("info")
        .display_name("Info")
        .description("Show application information")
        .handler(run_info)
        .build()
}

fn run_help(invocation: Invocation<'_>) -> HandlerResult {
    let target = invocation.parent().unwrap_or(invocation.command());
    let format = invocation
        .value("format")
        .and_then(Value::as_enum)
        .unwrap_or("std");
    let filter = invocation
        .value("filter")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let required_only = invocation
        .value("required-only")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let data = HelpData::new(target, invocation.root()).filtered(filter, required_only);
    let output = match format {
        "json" => serde_json::to_string_pretty(&data)?,
        _ => render_text(&data),
    };
    println!("{output}");
    Ok(())
}

fn run_version(invocation: Invocation<'_>) -> HandlerResult {
    let Some(application) = invocation.root().application() else {
        anyhow::bail!("'{}' does not declare an application version", invocation.root().name());
    };
    println!("{}", application.version);
    Ok(())
}

fn run_info(invocation: Invocation<'_>) -> HandlerResult {
    let root = invocation.root();
    println!("{}", root.display_name());
    for line in info_lines(root.application()) {
        println!("{line}");
    }
    Ok(())
}

fn info_lines(application: Option<&ApplicationInfo>) -> Vec<String> {
    let Some(application) = application else {
        return Vec::new();
    };
    [
        ("Version", &application.version),
        ("Author", &application.author),
        ("Website", &application.website),
        ("Copyright", &application.copyright),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}: {value}"))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtree_parser::resolve;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_tree() -> Command {
        let create = Command::builder("create")
            .display_name("Create")
            .description("Create a thing")
            .argument(
                Argument::new("title", TypeDescriptor::string())
                    .with_display_name("Title")
                    .with_short('t')
                    .at_position(0),
            )
            .argument(
                Argument::new("description", TypeDescriptor::string())
                    .with_display_name("Description")
                    .with_default(""),
            )
            .help_command(help_command().unwrap())
            .build()
            .unwrap();

        Command::builder("thing")
            .display_name("Thing")
            .application(ApplicationInfo::new("1.2.3").with_author("Someone"))
            .subcommand(create)
            .help_command(help_command().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_usage_for_routed_node() {
        let mut root = sample_tree();
        resolve(&mut root, &tokens(&["create", "help"])).unwrap();
        let create = root.subcommand("create").unwrap();
        assert_eq!(usage(create), "thing create <title> [arguments]");
    }

    #[test]
    fn test_usage_for_unrouted_root() {
        let root = sample_tree();
        assert_eq!(usage(&root), "thing [command]");
    }

    #[test]
    fn test_help_child_alone_is_not_a_command_list() {
        let help = help_command().unwrap();
        assert_eq!(usage(&help), "help [arguments]");
        assert!(help.help_command().is_some());
        assert!(help.help_command().unwrap().help_command().is_none());
    }

    #[test]
    fn test_help_data_filters() {
        let root = sample_tree();
        let create = root.subcommand("create").unwrap();

        let all = HelpData::new(create, &root);
        assert_eq!(all.arguments.len(), 2);
        assert_eq!(all.application.as_ref().map(|a| a.version.as_str()), Some("1.2.3"));

        let required = HelpData::new(create, &root).filtered("", true);
        assert_eq!(required.arguments.len(), 1);
        assert_eq!(required.arguments[0].name, "title");

        let by_text = HelpData::new(create, &root).filtered("DESC", false);
        assert_eq!(by_text.arguments.len(), 1);
        assert_eq!(by_text.arguments[0].name, "description");
        assert!(by_text.sub_commands.is_empty());
    }

    #[test]
    fn test_help_data_json_shape() {
        let root = sample_tree();
        let json = serde_json::to_value(HelpData::new(&root, &root)).unwrap();
        assert_eq!(json["command"]["name"], "thing");
        assert_eq!(json["usage"], "thing [command]");
        assert_eq!(json["sub_commands"][0]["name"], "create");
        assert_eq!(json["application"]["author"], "Someone");
    }

    #[test]
    fn test_render_text() {
        let root = sample_tree();
        let text = render_text(&HelpData::new(root.subcommand("create").unwrap(), &root));
        assert!(text.starts_with("Create\nCreate a thing\n\nUsage: create <title> [arguments]"));
        assert!(text.contains("  --title, -t <string>  Title (required)"));
        assert!(text.contains("  --description <string>  Description"));
        assert!(text.contains("Commands:\n  help  Show help for a command"));
    }

    #[test]
    fn test_info_lines_skip_empty_fields() {
        let application = ApplicationInfo::new("0.1.0").with_website("https://example.org");
        assert_eq!(
            info_lines(Some(&application)),
            vec!["Version: 0.1.0", "Website: https://example.org"]
        );
        assert!(info_lines(None).is_empty());
    }

    #[test]
    fn test_help_format_is_case_insensitive() {
        let mut help = help_command().unwrap();
        let selected = resolve(&mut help, &tokens(&["-f", "JSON", "--required-only"])).unwrap();
        assert_eq!(selected.value("format"), Some(&Value::Enum("json".to_string())));
        assert_eq!(selected.value("required-only"), Some(&Value::Bool(true)));
    }
}
