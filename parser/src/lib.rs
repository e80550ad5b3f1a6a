//! Token resolution for argtree command trees.
//!
//! Given a [`Command`](argtree_core::Command) tree and a token list, this
//! crate selects the addressed node, coerces and binds its argument values,
//! and reports failures as a typed [`ParseError`] that carries enough data
//! for a caller to render diagnostics and suggestions.
//!
//! # Main entry points
//!
//! - [`resolve`]: route, bind, and check required arguments.
//! - [`convert`]: coerce one token into a declared type.
//! - [`suggest_arguments`] / [`suggest_subcommands`]: edit-distance hints
//!   for an unmatched token.
//!
//! # Example
//!
//! ```
//! use argtree_core::{Argument, Command, TypeDescriptor, Value};
//! use argtree_parser::{ParseError, resolve};
//!
//! let create = Command::builder("create")
//!     .argument(Argument::new("title", TypeDescriptor::string()).at_position(0))
//!     .argument(Argument::new("draft", TypeDescriptor::bool()).with_default(false))
//!     .build()
//!     .unwrap();
//! let root = Command::builder("thing").subcommand(create).build().unwrap();
//!
//! let mut tree = root.clone();
//! let tokens: Vec<String> = ["create", "Hello", "--draft"].map(String::from).to_vec();
//! let selected = resolve(&mut tree, &tokens).unwrap();
//! assert_eq!(selected.name(), "create");
//! assert_eq!(selected.value("title"), Some(&Value::from("Hello")));
//! assert_eq!(selected.value("draft"), Some(&Value::Bool(true)));
//!
//! // Values are written into the tree, so each run starts from a fresh copy.
//! let mut tree = root.clone();
//! let missing: Vec<String> = vec!["create".to_string()];
//! let err = resolve(&mut tree, &missing).unwrap_err();
//! assert!(matches!(err, ParseError::MissingArgument { .. }));
//! ```

pub mod coerce;
pub mod error;
pub mod escape;
pub mod matcher;
pub mod resolve;
pub mod suggest;

pub use coerce::convert;
pub use error::{CoercionError, ParseError, Result};
pub use resolve::resolve;
pub use suggest::{SUGGESTION_CUTOFF, suggest_arguments, suggest_subcommands};
