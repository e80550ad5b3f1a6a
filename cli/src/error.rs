//! Error types for the runner.

use argtree_core::ValidationError;
use argtree_parser::ParseError;
use thiserror::Error;

/// Failures the runner reports through an [`ErrorHandler`](crate::ErrorHandler).
#[derive(Debug, Error)]
pub enum CliError {
    /// The command tree was declared incorrectly.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The tokens did not resolve against the tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failures that escape [`Runner::run`](crate::Runner::run).
#[derive(Debug, Error)]
pub enum RunError {
    /// A command body returned an error.
    #[error("command '{command}' failed: {source}")]
    Command {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    /// The resolved path no longer names a node in the tree.
    #[error("resolved path '{0}' does not exist in the command tree")]
    UnresolvedPath(String),
}

/// Errors loading or saving a [`RunnerConfig`](crate::RunnerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
