//! Command tree nodes.
//!
//! A [`Command`] owns its declared [`Argument`]s and sub-commands. Nodes are
//! assembled with a [`CommandBuilder`], which runs the structural validator
//! before handing the node out, so every `Command` in a tree is known to be
//! well-formed before any token is parsed.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;

use crate::argument::Argument;
use crate::info::{ApplicationInfo, CommandIdentity, CommandInfo};
use crate::types::Value;
use crate::validate::{ValidationError, validate_command};

/// Result of a command body.
pub type HandlerResult = anyhow::Result<()>;

/// Future returned by an asynchronous command body.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = HandlerResult> + Send + 'a>>;

type SyncHandler = dyn Fn(Invocation<'_>) -> HandlerResult + Send + Sync;
type AsyncHandler = dyn for<'a> Fn(Invocation<'a>) -> HandlerFuture<'a> + Send + Sync;

/// The body run once a command has been resolved.
#[derive(Clone)]
pub enum Handler {
    Sync(Arc<SyncHandler>),
    Async(Arc<AsyncHandler>),
}

impl Handler {
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Handler::Sync"),
            Self::Async(_) => f.write_str("Handler::Async"),
        }
    }
}

/// A resolved command together with its ancestors, handed to its handler.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    command: &'a Command,
    parent: Option<&'a Command>,
    root: &'a Command,
}

impl<'a> Invocation<'a> {
    pub fn new(command: &'a Command, parent: Option<&'a Command>, root: &'a Command) -> Self {
        Self {
            command,
            parent,
            root,
        }
    }

    /// Follows a [`Context`] path (root name first) down from `root`.
    ///
    /// Returns `None` when the path does not name a node under `root`.
    pub fn from_path(root: &'a Command, path: &[String]) -> Option<Self> {
        let mut parent = None;
        let mut command = root;
        for name in path.iter().skip(1) {
            let child = command.subcommand(name)?;
            parent = Some(command);
            command = child;
        }
        Some(Self::new(command, parent, root))
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    pub fn parent(&self) -> Option<&'a Command> {
        self.parent
    }

    pub fn root(&self) -> &'a Command {
        self.root
    }

    /// Bound value of the command's argument called `name`.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.command.value(name)
    }
}

/// Per-resolution record attached to every node on the resolved path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    root: Option<CommandIdentity>,
    parent: Option<CommandIdentity>,
    path: Vec<String>,
    original_arguments: Vec<String>,
    scoped_arguments: Vec<String>,
}

impl Context {
    /// Context of the root node for a run over `tokens`.
    pub fn for_root(root: &Command, tokens: &[String]) -> Self {
        Self {
            root: Some(root.identity()),
            parent: None,
            path: vec![root.name().to_string()],
            original_arguments: tokens.to_vec(),
            scoped_arguments: tokens.to_vec(),
        }
    }

    /// Context of `child`, reached from the node owning `self`.
    pub fn for_child(&self, current: &Command, child: &Command) -> Self {
        let mut path = self.path.clone();
        path.push(child.name().to_string());
        Self {
            root: self.root.clone(),
            parent: Some(current.identity()),
            path,
            original_arguments: self.original_arguments.clone(),
            scoped_arguments: Vec::new(),
        }
    }

    pub fn with_scoped_arguments(mut self, tokens: &[String]) -> Self {
        self.scoped_arguments = tokens.to_vec();
        self
    }

    pub fn root(&self) -> Option<&CommandIdentity> {
        self.root.as_ref()
    }

    pub fn parent(&self) -> Option<&CommandIdentity> {
        self.parent.as_ref()
    }

    /// Command names from the root down to this node.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn original_arguments(&self) -> &[String] {
        &self.original_arguments
    }

    /// The token slice this node consumed after sub-command routing.
    pub fn scoped_arguments(&self) -> &[String] {
        &self.scoped_arguments
    }
}

/// A command node: identity, arguments, sub-commands and an optional body.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Command, TypeDescriptor};
///
/// let create = Command::builder("create")
///     .description("Create a thing")
///     .argument(Argument::new("title", TypeDescriptor::string()).with_short('t'))
///     .build()
///     .unwrap();
///
/// let root = Command::builder("thing").subcommand(create).build().unwrap();
/// assert!(root.subcommand("create").is_some());
/// assert_eq!(root.info().sub_commands[0].name, "create");
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    display_name: String,
    description: String,
    aliases: Vec<String>,
    arguments: Vec<Argument>,
    subcommands: Vec<Command>,
    help: Option<String>,
    application: Option<ApplicationInfo>,
    handler: Option<Handler>,
    context: Context,
}

impl Command {
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
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

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Declared arguments in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    pub fn argument_mut(&mut self, index: usize) -> Option<&mut Argument> {
        self.arguments.get_mut(index)
    }

    /// Bound value of the argument called `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.argument(name).and_then(Argument::value)
    }

    /// Positional arguments ordered by position.
    pub fn positional_arguments(&self) -> Vec<&Argument> {
        let mut positional: Vec<&Argument> = self
            .arguments
            .iter()
            .filter(|a| a.position().is_some())
            .collect();
        positional.sort_by_key(|a| a.position());
        positional
    }

    /// Sub-commands in declaration order.
    pub fn subcommands(&self) -> &[Command] {
        &self.subcommands
    }

    /// Finds a direct child by exact name.
    pub fn subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|c| c.name == name)
    }

    pub fn subcommands_mut(&mut self) -> &mut [Command] {
        &mut self.subcommands
    }

    /// Case-insensitive comparison against the name and every alias.
    pub fn answers_to(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.name.to_lowercase() == token || self.aliases.iter().any(|a| a.to_lowercase() == token)
    }

    /// The child designated as this node's help handler.
    pub fn help_command(&self) -> Option<&Command> {
        self.help.as_deref().and_then(|name| self.subcommand(name))
    }

    pub fn application(&self) -> Option<&ApplicationInfo> {
        self.application.as_ref()
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    pub fn identity(&self) -> CommandIdentity {
        CommandIdentity {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            aliases: self.aliases.clone(),
        }
    }

    pub fn info(&self) -> CommandInfo {
        CommandInfo {
            identity: self.identity(),
            arguments: self.arguments.iter().map(Argument::info).collect(),
            sub_commands: self.subcommands.iter().map(Command::identity).collect(),
        }
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.display_name == other.display_name
            && self.description == other.description
            && self.aliases == other.aliases
            && self.arguments == other.arguments
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments: Vec<String> = self
            .arguments
            .iter()
            .map(|a| format!("{}:{}", a.name(), a))
            .collect();
        let subcommands: Vec<&str> = self.subcommands.iter().map(|c| c.name()).collect();
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("args", &arguments)
            .field("sub_cmd", &subcommands)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Command`] and validates it on [`build`](CommandBuilder::build).
pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            command: Command {
                display_name: name.clone(),
                name,
                description: String::new(),
                aliases: Vec::new(),
                arguments: Vec::new(),
                subcommands: Vec::new(),
                help: None,
                application: None,
                handler: None,
                context: Context::default(),
            },
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.command.display_name = display_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.command.description = description.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.command.aliases.push(alias.into());
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.command.arguments.push(argument);
        self
    }

    pub fn subcommand(mut self, command: Command) -> Self {
        self.command.subcommands.push(command);
        self
    }

    /// Adds `command` as a child and designates it as this node's help.
    pub fn help_command(mut self, command: Command) -> Self {
        self.command.help = Some(command.name.clone());
        self.command.subcommands.push(command);
        self
    }

    pub fn application(mut self, application: ApplicationInfo) -> Self {
        self.command.application = Some(application);
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Invocation<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.command.handler = Some(Handler::Sync(Arc::new(handler)));
        self
    }

    /// Sets an asynchronous body, driven to completion by the runner.
    pub fn async_handler<F>(mut self, handler: F) -> Self
    where
        F: for<'a> Fn(Invocation<'a>) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        self.command.handler = Some(Handler::Async(Arc::new(handler)));
        self
    }

    /// Validates the declaration and returns the node.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found in this node's own
    /// declarations. Children were validated when they were built.
    pub fn build(self) -> Result<Command, ValidationError> {
        validate_command(&self.command)?;
        Ok(self.command)
    }
}
