//! Driver for argtree command trees.
//!
//! [`Runner`] resolves a token list with `argtree-parser`, reports
//! resolution failures through an [`ErrorHandler`], and runs the selected
//! command's handler. Asynchronous handlers are driven to completion on the
//! calling thread once resolution has finished.
//!
//! The [`builtin`] module provides `help`, `version` and `info` commands that
//! can be attached to any tree.
//!
//! # Example
//!
//! ```
//! use argtree_cli::{Runner, builtin};
//! use argtree_core::{ApplicationInfo, Command};
//!
//! let root = Command::builder("app")
//!     .application(ApplicationInfo::new("0.1.0"))
//!     .subcommand(builtin::version_command().unwrap())
//!     .help_command(builtin::help_command().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let runner = Runner::new(root);
//! assert_eq!(runner.run(&["version".to_string()]).unwrap(), 0);
//! assert_eq!(runner.run(&["--nope".to_string()]).unwrap(), 1);
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod handler;
pub mod runner;

pub use config::{CONFIG_ENV, RunnerConfig};
pub use error::{CliError, ConfigError, RunError};
pub use handler::{DefaultErrorHandler, ErrorHandler};
pub use runner::Runner;
