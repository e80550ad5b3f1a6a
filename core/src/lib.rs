//! Core types and validation for declarative command trees.
//!
//! This crate defines the data model the resolver works on:
//!
//! - [`Command`]: a node with identity, ordered [`Argument`]s, sub-commands,
//!   an optional help child and an optional [`Handler`].
//! - [`Argument`]: a typed argument addressed by name, alias, short form or
//!   position.
//! - [`TypeDescriptor`] / [`Value`]: declared types and coerced values,
//!   including [`Constructor`]-built value objects.
//! - [`Context`]: per-run routing record attached to resolved nodes.
//! - [`CommandInfo`] / [`ArgumentInfo`]: serializable snapshots used by
//!   diagnostics and help output.
//!
//! Validation ([`validate_command`]) runs when a node is built and rejects
//! malformed declarations such as non-contiguous positional slots.
//!
//! # Example
//!
//! ```
//! use argtree_core::*;
//!
//! let create = Command::builder("create")
//!     .display_name("Create")
//!     .description("Create a thing")
//!     .argument(
//!         Argument::new("title", TypeDescriptor::string())
//!             .with_short('t')
//!             .at_position(0),
//!     )
//!     .argument(
//!         Argument::new("description", TypeDescriptor::string())
//!             .with_alias("desc")
//!             .with_default(""),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let root = Command::builder("thing").subcommand(create).build().unwrap();
//! assert_eq!(root.subcommands()[0].positional_arguments()[0].name(), "title");
//! ```

mod argument;
mod command;
mod info;
mod types;
mod validate;

pub use argument::Argument;
pub use command::{
    Command, CommandBuilder, Context, Handler, HandlerFuture, HandlerResult, Invocation,
};
pub use info::{ApplicationInfo, ArgumentInfo, CommandIdentity, CommandInfo};
pub use types::*;
pub use validate::{ValidationError, validate_command};
