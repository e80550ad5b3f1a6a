//! Resolve-then-execute driver.

use argtree_core::{Command, Handler, Invocation};
use argtree_parser::resolve;
use tracing::debug;

use crate::config::RunnerConfig;
use crate::error::{CliError, RunError};
use crate::handler::{DefaultErrorHandler, ErrorHandler};

/// Runs a command tree against token lists.
///
/// Each run resolves a fresh copy of the tree, so a `Runner` can be reused.
/// Resolution errors go to the error handler and turn into
/// [`RunnerConfig::error_exit_code`]; errors from command bodies are
/// returned as [`RunError::Command`].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use argtree_cli::Runner;
/// use argtree_core::{Argument, Command, TypeDescriptor, Value};
///
/// let seen = Arc::new(Mutex::new(None));
/// let sink = Arc::clone(&seen);
/// let root = Command::builder("app")
///     .argument(Argument::new("count", TypeDescriptor::integer()))
///     .handler(move |invocation| {
///         *sink.lock().unwrap() = invocation.value("count").and_then(Value::as_i64);
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// let code = Runner::new(root).run(&["--count".to_string(), "7".to_string()]).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(*seen.lock().unwrap(), Some(7));
/// ```
pub struct Runner {
    root: Command,
    config: RunnerConfig,
    error_handler: Option<Box<dyn ErrorHandler>>,
}

impl Runner {
    pub fn new(root: Command) -> Self {
        Self {
            root,
            config: RunnerConfig::default(),
            error_handler: None,
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the [`DefaultErrorHandler`].
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Resolves `tokens` and runs the selected command.
    ///
    /// Returns the process exit code: `0` on success, the configured error
    /// code when resolution failed.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when a command body fails.
    pub fn run(&self, tokens: &[String]) -> Result<i32, RunError> {
        let mut tree = self.root.clone();

        let path = match resolve(&mut tree, tokens) {
            Ok(selected) => selected.context().path().to_vec(),
            Err(err) => {
                debug!(error = %err, "Resolution failed");
                self.report(&CliError::from(err));
                return Ok(self.config.error_exit_code);
            }
        };

        let invocation = Invocation::from_path(&tree, &path)
            .ok_or_else(|| RunError::UnresolvedPath(path.join(" ")))?;
        execute(invocation)?;
        Ok(0)
    }

    /// Hands `error` to the configured error handler.
    pub fn report(&self, error: &CliError) {
        match &self.error_handler {
            Some(handler) => handler.handle(error),
            None => DefaultErrorHandler::from_config(&self.config).handle(error),
        }
    }
}

/// Runs the invocation's handler, falling back to the node's help child.
fn execute(invocation: Invocation<'_>) -> Result<(), RunError> {
    let command = invocation.command();

    let Some(handler) = command.handler() else {
        return match command.help_command() {
            Some(help) => {
                debug!(command = command.name(), "No handler, showing help");
                execute(Invocation::new(help, Some(command), invocation.root()))
            }
            None => {
                debug!(command = command.name(), "No handler");
                Ok(())
            }
        };
    };

    debug!(
        command = command.name(),
        is_async = handler.is_async(),
        "Running command"
    );
    let result = match handler {
        Handler::Sync(body) => body(invocation),
        Handler::Async(body) => futures::executor::block_on(body(invocation)),
    };

    result.map_err(|source| RunError::Command {
        command: command.name().to_string(),
        source,
    })
}
